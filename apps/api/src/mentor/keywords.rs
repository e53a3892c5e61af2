//! Keyword matching shared by intent classification, stack detection and fallbacks.

/// A user message lowercased once and split into alphanumeric tokens.
///
/// Single-word keywords match the start of a token, so `vaga` matches `vagas`
/// but `api` does not match `rapidamente`. Keywords containing spaces or
/// punctuation (`plano de carreira`, `node.js`) match anywhere in the text.
#[derive(Debug, Clone)]
pub struct NormalizedMessage {
    original: String,
    lowered: String,
}

impl NormalizedMessage {
    pub fn new(message: &str) -> Self {
        Self {
            original: message.trim().to_string(),
            lowered: message.trim().to_lowercase(),
        }
    }

    /// The trimmed message as the user wrote it.
    pub fn original(&self) -> &str {
        &self.original
    }

    fn tokens(&self) -> impl Iterator<Item = &str> {
        self.lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
    }

    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        if keyword.is_empty() {
            return false;
        }
        if keyword.chars().all(char::is_alphanumeric) {
            self.tokens().any(|t| t.starts_with(keyword.as_str()))
        } else {
            self.lowered.contains(keyword.as_str())
        }
    }

    pub fn matches_any<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        keywords.iter().any(|k| self.matches(k.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_matches_token_prefix() {
        let msg = NormalizedMessage::new("Tem VAGAS abertas?");
        assert!(msg.matches("vaga"));
        assert!(!msg.matches("abertura"));
    }

    #[test]
    fn test_single_word_does_not_match_inside_token() {
        let msg = NormalizedMessage::new("Preciso responder rapidamente");
        assert!(!msg.matches("api"));
    }

    #[test]
    fn test_phrase_matches_substring() {
        let msg = NormalizedMessage::new("Monte um plano de carreira com Node.js");
        assert!(msg.matches("plano de carreira"));
        assert!(msg.matches("node.js"));
        assert!(!msg.matches("front end"));
    }

    #[test]
    fn test_accented_keywords() {
        let msg = NormalizedMessage::new("Qual o SALÁRIO médio?");
        assert!(msg.matches("salário"));
        assert!(!msg.matches("salario"));
    }

    #[test]
    fn test_original_is_trimmed_not_lowered() {
        let msg = NormalizedMessage::new("  Currículo Backend \n");
        assert_eq!(msg.original(), "Currículo Backend");
        assert!(msg.matches("backend"));
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        assert!(!NormalizedMessage::new("qualquer coisa").matches(""));
    }
}
