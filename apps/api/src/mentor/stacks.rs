//! Tech stack catalog: the static table behind résumé, salary, job and plan answers.

use serde::Serialize;

use crate::mentor::keywords::NormalizedMessage;

/// Stack used when the message names none.
pub const DEFAULT_STACK: &str = "Fullstack";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SalaryBands {
    pub junior: String,
    pub mid: String,
    pub senior: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TechStack {
    pub name: String,
    /// Lowercase keywords that select this stack. The name itself is not matched,
    /// since "data" is also the Portuguese word for date.
    pub aliases: Vec<String>,
    /// Ordered; rendered verbatim in résumé templates and used as job search keywords.
    pub skills: Vec<String>,
    pub salary_range: String,
    pub salary_bands: SalaryBands,
    /// Skills that move the salary band.
    pub key_skills: Vec<String>,
    pub tips: Vec<String>,
}

/// Read-only catalog, built once at startup. Detection walks stacks in insertion order.
#[derive(Debug, Clone)]
pub struct StackCatalog {
    stacks: Vec<TechStack>,
    default_index: usize,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn bands(junior: &str, mid: &str, senior: &str) -> SalaryBands {
    SalaryBands {
        junior: junior.to_string(),
        mid: mid.to_string(),
        senior: senior.to_string(),
    }
}

impl StackCatalog {
    pub fn builtin() -> Self {
        let stacks = vec![
            // Checked first so "full stack com React" is not taken for Frontend.
            TechStack {
                name: DEFAULT_STACK.to_string(),
                aliases: strings(&["fullstack", "full-stack", "full stack", "geral"]),
                skills: strings(&["JavaScript", "TypeScript", "React", "Node.js", "SQL"]),
                salary_range: "R$ 5k-14k".to_string(),
                salary_bands: bands("R$ 3.500 - 6.000", "R$ 7.000 - 11.000", "R$ 12.000 - 18.000"),
                key_skills: strings(&["Arquitetura de APIs", "Cloud (AWS/GCP)", "Testes automatizados"]),
                tips: strings(&[
                    "Domine uma stack de ponta a ponta antes de diversificar",
                    "Publique projetos completos (front, API e banco) no GitHub",
                    "Aprenda o básico de deploy e CI/CD",
                ]),
            },
            TechStack {
                name: "Frontend".to_string(),
                aliases: strings(&["frontend", "front-end", "front end", "react", "angular", "vue"]),
                skills: strings(&["React", "TypeScript", "HTML/CSS", "Next.js"]),
                salary_range: "R$ 4k-12k".to_string(),
                salary_bands: bands("R$ 3.000 - 5.500", "R$ 6.000 - 9.500", "R$ 10.000 - 15.000"),
                key_skills: strings(&["TypeScript", "Acessibilidade", "Performance web"]),
                tips: strings(&[
                    "Construa um portfólio com interfaces responsivas",
                    "Estude testes de componentes e acessibilidade",
                    "Acompanhe a evolução do ecossistema React/Next.js",
                ]),
            },
            TechStack {
                name: "Backend".to_string(),
                aliases: strings(&["backend", "back-end", "back end", "java", "node", "api", "apis"]),
                skills: strings(&["Python", "Node.js", "SQL", "Docker"]),
                salary_range: "R$ 5k-15k".to_string(),
                salary_bands: bands("R$ 4.000 - 7.000", "R$ 8.000 - 12.000", "R$ 13.000 - 20.000"),
                key_skills: strings(&["Cloud (AWS/GCP)", "Microsserviços", "Mensageria"]),
                tips: strings(&[
                    "Pratique modelagem de dados e SQL avançado",
                    "Crie APIs com autenticação, testes e documentação",
                    "Aprenda containers e observabilidade básica",
                ]),
            },
            TechStack {
                name: "Data".to_string(),
                aliases: strings(&[
                    "dados",
                    "data science",
                    "data engineer",
                    "big data",
                    "cientista",
                    "machine learning",
                ]),
                skills: strings(&["Python", "SQL", "Pandas", "Spark"]),
                salary_range: "R$ 6k-18k".to_string(),
                salary_bands: bands("R$ 4.500 - 7.500", "R$ 9.000 - 14.000", "R$ 15.000 - 22.000"),
                key_skills: strings(&["Spark", "Modelagem estatística", "Engenharia de dados"]),
                tips: strings(&[
                    "Fortaleça estatística e SQL antes de modelos complexos",
                    "Monte pipelines de dados de ponta a ponta",
                    "Comunique resultados com visualizações claras",
                ]),
            },
        ];

        Self {
            stacks,
            default_index: 0, // DEFAULT_STACK is the first entry
        }
    }

    pub fn stacks(&self) -> &[TechStack] {
        &self.stacks
    }

    pub fn default_stack(&self) -> &TechStack {
        &self.stacks[self.default_index]
    }

    /// Case-insensitive lookup by name.
    pub fn get(&self, name: &str) -> Option<&TechStack> {
        self.stacks
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
    }

    /// First stack with an alias in the message, else the default.
    pub fn detect(&self, message: &NormalizedMessage) -> &TechStack {
        self.stacks
            .iter()
            .find(|s| message.matches_any(&s.aliases))
            .unwrap_or_else(|| self.default_stack())
    }
}
