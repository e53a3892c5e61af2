// Prompt templates for calls to the inference service.
// The rendered text doubles as the cache key.

pub const CLASSIFY_PROMPT_TEMPLATE: &str = r#"Classifique esta mensagem de um usuário interessado em carreira tech.
Mensagem: "{message}"
Opções: VAGAS, CURRICULO, SALARIO, PLANO, OUTROS
Responda apenas com a opção em MAIÚSCULAS."#;

/// Builds the conversational prompt in one pass, so braces inside either part stay literal.
pub fn reply_prompt(history: &str, message: &str) -> String {
    format!(
        "Você é um mentor de carreiras em tecnologia. Responda em português, de forma curta e prática.\n\
         Não invente vagas nem valores salariais.\n\
         \n\
         Conversa até agora:\n\
         {history}\n\
         \n\
         Pergunta: {message}"
    )
}

/// Number of trailing history turns included in a reply prompt.
pub const HISTORY_WINDOW: usize = 6;
