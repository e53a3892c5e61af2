//! Canned and template-filled answers. Everything here is pure and deterministic.

use std::str::FromStr;

use anyhow::bail;

use crate::mentor::keywords::NormalizedMessage;
use crate::mentor::stacks::TechStack;
use crate::models::job::JobListing;

pub const REPHRASE_PROMPT: &str = "Por favor, formule melhor sua pergunta.";

pub const MESSAGE_TOO_LONG: &str =
    "Sua mensagem é muito longa. Resuma a pergunta em até 2000 caracteres.";

pub const UNAVAILABLE: &str = "Sistema temporariamente indisponível. Tente novamente em instantes.";

pub const NO_LISTINGS: &str =
    "Nenhuma vaga encontrada para o seu perfil no momento. Tente outra stack ou volte mais tarde.";

pub const HELP_MENU: &str = "\
🤖 Sou seu mentor de carreiras tech. Posso ajudar com:
- 📄 Currículos: \"Como criar um currículo para Desenvolvedor Backend?\"
- 💰 Salários: \"Qual o salário de um Frontend?\"
- 💼 Vagas: \"Tem vagas na área de dados?\"
- 🧭 Planos de carreira: \"Quais habilidades aprender em Java?\"
Stacks disponíveis: Frontend, Backend, Data e Fullstack.";

pub const SALARY_SOURCES: &str = "Glassdoor, Levels.fyi e Pesquisa Salarial Código Fonte TV";

const FALLBACK_RESUME: &str = "📄 Modelo de currículo:\n- Resumo profissional\n- Habilidades técnicas\n- Experiência profissional\n- Projetos e links (GitHub, portfólio)";
const FALLBACK_SALARY: &str = "💰 Faixas salariais variam por stack e senioridade. Consulte Glassdoor ou Levels.fyi para valores atualizados.";
const FALLBACK_GENERAL: &str = "Como posso ajudar com sua carreira tech?";

// Only consulted after the keyword tier missed, so none of these overlap with it.
const FALLBACK_RESUME_KEYWORDS: &[&str] = &[
    "portfólio",
    "portfolio",
    "experiência",
    "experiencia",
    "perfil",
    "entrevista",
];
const FALLBACK_SALARY_KEYWORDS: &[&str] = &["paga", "quanto", "faixa", "pretensão", "pretensao", "clt", "pj"];

/// How salary answers are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SalaryDetail {
    /// The stack's single salary range.
    #[default]
    Range,
    /// Junior/mid/senior table with key skills and sources.
    Bands,
}

impl FromStr for SalaryDetail {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "range" => Ok(SalaryDetail::Range),
            "bands" => Ok(SalaryDetail::Bands),
            other => bail!("SALARY_DETAIL must be 'range' or 'bands', got '{other}'"),
        }
    }
}

/// Coarse message category used to pick an offline answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackCategory {
    Resume,
    Salary,
    General,
}

impl FallbackCategory {
    pub fn of(message: &NormalizedMessage) -> Self {
        if message.matches_any(FALLBACK_RESUME_KEYWORDS) {
            FallbackCategory::Resume
        } else if message.matches_any(FALLBACK_SALARY_KEYWORDS) {
            FallbackCategory::Salary
        } else {
            FallbackCategory::General
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            FallbackCategory::Resume => FALLBACK_RESUME,
            FallbackCategory::Salary => FALLBACK_SALARY,
            FallbackCategory::General => FALLBACK_GENERAL,
        }
    }
}

/// Offline answer used when the inference service fails.
pub fn local_fallback(message: &NormalizedMessage) -> &'static str {
    FallbackCategory::of(message).text()
}

pub fn render_resume(stack: &TechStack) -> String {
    format!(
        "📄 Modelo de Currículo - {name}\n\
         \n\
         Resumo profissional: Desenvolvedor(a) {name} com foco em {lead}.\n\
         Habilidades: {skills}\n\
         Experiência profissional: cargo, empresa, período e resultados mensuráveis.\n\
         Projetos: 2 a 3 projetos usando {skills}, com link para o repositório.\n\
         Formação e certificações.\n\
         \n\
         Faixa salarial de referência: {range}",
        name = stack.name,
        lead = stack.skills.first().map(String::as_str).unwrap_or("tecnologia"),
        skills = stack.skills.join(", "),
        range = stack.salary_range,
    )
}

pub fn render_salary(stack: &TechStack, detail: SalaryDetail) -> String {
    match detail {
        SalaryDetail::Range => format!(
            "💰 Salário médio para {}: {} (CLT, mensal).",
            stack.name, stack.salary_range
        ),
        SalaryDetail::Bands => format!(
            "💰 Salários para {name} (faixa geral: {range})\n\
             \n\
             | Nível  | Faixa mensal |\n\
             |--------|--------------|\n\
             | Júnior | {junior} |\n\
             | Pleno  | {mid} |\n\
             | Sênior | {senior} |\n\
             \n\
             Habilidades que elevam o salário: {key_skills}\n\
             Fontes: {sources}",
            name = stack.name,
            range = stack.salary_range,
            junior = stack.salary_bands.junior,
            mid = stack.salary_bands.mid,
            senior = stack.salary_bands.senior,
            key_skills = stack.key_skills.join(", "),
            sources = SALARY_SOURCES,
        ),
    }
}

pub fn render_job_card(job: &JobListing) -> String {
    format!(
        "💼 {} - {}\n   Skills: {} | Salário: {}\n   🔗 {}",
        job.title, job.company, job.skills, job.salary, job.link
    )
}

pub fn render_jobs(stack: &TechStack, jobs: &[JobListing]) -> String {
    if jobs.is_empty() {
        return NO_LISTINGS.to_string();
    }
    let cards: Vec<String> = jobs.iter().map(render_job_card).collect();
    format!("Vagas para {}:\n\n{}", stack.name, cards.join("\n\n"))
}

pub fn render_plan(stack: &TechStack) -> String {
    let steps: Vec<String> = stack
        .tips
        .iter()
        .enumerate()
        .map(|(i, tip)| format!("{}. {}", i + 1, tip))
        .collect();
    format!(
        "🧭 Plano de carreira - {}\nHabilidades-chave: {}\n{}\n\n{}",
        stack.name,
        stack.skills.join(", "),
        steps.join("\n"),
        HELP_MENU
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mentor::intent::Intent;
    use crate::mentor::stacks::StackCatalog;
    use chrono::NaiveDate;

    fn backend() -> TechStack {
        StackCatalog::builtin().get("Backend").unwrap().clone()
    }

    fn listing(id: i64, title: &str) -> JobListing {
        JobListing {
            id,
            title: title.to_string(),
            company: "Acme".to_string(),
            skills: "Python/SQL".to_string(),
            salary: "R$ 9.000".to_string(),
            link: format!("https://exemplo.com/vaga{id}"),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_resume_lists_skills_verbatim() {
        let text = render_resume(&backend());
        assert!(text.contains("Modelo de Currículo - Backend"));
        assert!(text.contains("Habilidades: Python, Node.js, SQL, Docker"));
        assert!(text.contains("R$ 5k-15k"));
    }

    #[test]
    fn test_salary_range_variant() {
        let text = render_salary(&backend(), SalaryDetail::Range);
        assert!(text.contains("Backend"));
        assert!(text.contains("R$ 5k-15k"));
        assert!(!text.contains("Júnior"));
    }

    #[test]
    fn test_salary_bands_variant() {
        let text = render_salary(&backend(), SalaryDetail::Bands);
        assert!(text.contains("R$ 5k-15k"));
        assert!(text.contains("| Júnior | R$ 4.000 - 7.000 |"));
        assert!(text.contains("| Sênior | R$ 13.000 - 20.000 |"));
        assert!(text.contains("Microsserviços"));
        assert!(text.contains(SALARY_SOURCES));
    }

    #[test]
    fn test_jobs_empty_is_fixed_message() {
        assert_eq!(render_jobs(&backend(), &[]), NO_LISTINGS);
    }

    #[test]
    fn test_jobs_render_one_card_each() {
        let text = render_jobs(&backend(), &[listing(1, "Dev Python"), listing(2, "Dev SQL")]);
        assert!(text.starts_with("Vagas para Backend:"));
        assert_eq!(text.matches("💼").count(), 2);
        assert!(text.contains("https://exemplo.com/vaga2"));
    }

    #[test]
    fn test_plan_numbers_tips_and_appends_menu() {
        let text = render_plan(&backend());
        assert!(text.contains("1. Pratique modelagem de dados e SQL avançado"));
        assert!(text.contains("3. Aprenda containers"));
        assert!(text.ends_with(HELP_MENU));
    }

    #[test]
    fn test_fallback_categories() {
        let of = |t: &str| FallbackCategory::of(&NormalizedMessage::new(t));
        assert_eq!(of("Como melhorar meu portfólio?"), FallbackCategory::Resume);
        assert_eq!(of("me ajuda com a entrevista"), FallbackCategory::Resume);
        assert_eq!(of("Quanto paga uma empresa de Backend?"), FallbackCategory::Salary);
        assert_eq!(of("vale mais CLT ou PJ?"), FallbackCategory::Salary);
        assert_eq!(of("oi"), FallbackCategory::General);
        assert_eq!(
            local_fallback(&NormalizedMessage::new("meu perfil profissional")),
            FALLBACK_RESUME
        );
    }

    #[test]
    fn test_fallback_keywords_are_not_intent_keywords() {
        for keyword in FALLBACK_RESUME_KEYWORDS.iter().chain(FALLBACK_SALARY_KEYWORDS) {
            assert_eq!(
                Intent::from_keywords(&NormalizedMessage::new(keyword)),
                None,
                "{keyword} is already handled by the keyword tier"
            );
        }
    }

    #[test]
    fn test_salary_detail_from_str() {
        assert_eq!("range".parse::<SalaryDetail>().unwrap(), SalaryDetail::Range);
        assert_eq!(" BANDS ".parse::<SalaryDetail>().unwrap(), SalaryDetail::Bands);
        assert!("table".parse::<SalaryDetail>().is_err());
    }
}
