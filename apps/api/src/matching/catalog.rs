use serde::{Deserialize, Serialize};

use crate::matching::skills::SkillSet;

/// An immutable job catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: u32,
    pub title: String,
    pub company: String,
    pub location: String,
    pub required_skills: SkillSet,
    pub description: String,
    /// Employer notified when someone applies.
    pub employer_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted: Option<String>,
}

/// Employer account that owns the seeded listings.
pub const DEMO_EMPLOYER_ID: u64 = 1;

/// Static, seeded job catalog. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct JobCatalog {
    jobs: Vec<Job>,
}

impl JobCatalog {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }

    /// The remote-first listings the job board launches with.
    pub fn seeded() -> Self {
        Self::new(vec![
            seed(
                1,
                "Senior Frontend Developer",
                "TechCorp",
                "Worldwide",
                &["React", "TypeScript", "Node.js"],
                "Join our team to build cutting-edge web applications using React and TypeScript.",
                ("$120,000 - $150,000", "Full-time", "2 weeks ago"),
            ),
            seed(
                2,
                "Product Manager",
                "InnovateLabs",
                "Americas",
                &["Product Strategy", "Agile", "User Research"],
                "Lead product development for our SaaS platform, working closely with engineering and design teams.",
                ("$110,000 - $140,000", "Full-time", "1 week ago"),
            ),
            seed(
                3,
                "UX/UI Designer",
                "DesignWave",
                "Europe",
                &["Figma", "User Testing", "Design Systems"],
                "Create beautiful and intuitive interfaces for our web and mobile applications.",
                ("$90,000 - $120,000", "Full-time", "3 days ago"),
            ),
            seed(
                4,
                "Backend Developer",
                "ServerTech",
                "Asia",
                &["Java", "Spring Boot", "AWS"],
                "Build robust and scalable backend services using Java and Spring Boot.",
                ("$100,000 - $130,000", "Full-time", "1 month ago"),
            ),
            seed(
                5,
                "DevOps Engineer",
                "CloudSys",
                "Worldwide",
                &["Kubernetes", "Docker", "CI/CD"],
                "Implement and maintain our cloud infrastructure and deployment pipelines.",
                ("$110,000 - $140,000", "Contract", "5 days ago"),
            ),
            seed(
                6,
                "Data Scientist",
                "DataInsight",
                "Americas",
                &["Python", "Machine Learning", "SQL"],
                "Analyze large datasets and build predictive models to drive business decisions.",
                ("$115,000 - $145,000", "Full-time", "2 weeks ago"),
            ),
        ])
    }

    pub fn all(&self) -> &[Job] {
        &self.jobs
    }

    pub fn get(&self, id: u32) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    /// Case-insensitive keyword search over title, company, and skills,
    /// optionally narrowed to a location. Catalog order is preserved.
    pub fn search(&self, query: Option<&str>, location: Option<&str>) -> Vec<Job> {
        let query = normalized(query);
        let location = normalized(location);

        self.jobs
            .iter()
            .filter(|job| match &query {
                Some(q) => {
                    job.title.to_lowercase().contains(q)
                        || job.company.to_lowercase().contains(q)
                        || job.required_skills.iter().any(|s| s.to_lowercase().contains(q))
                }
                None => true,
            })
            .filter(|job| match &location {
                Some(loc) => job.location.to_lowercase().contains(loc),
                None => true,
            })
            .cloned()
            .collect()
    }
}

fn normalized(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

fn seed(
    id: u32,
    title: &str,
    company: &str,
    location: &str,
    skills: &[&str],
    description: &str,
    (salary, employment_type, posted): (&str, &str, &str),
) -> Job {
    Job {
        id,
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        required_skills: skills.iter().copied().collect(),
        description: description.to_string(),
        employer_id: DEMO_EMPLOYER_ID,
        salary: Some(salary.to_string()),
        employment_type: Some(employment_type.to_string()),
        posted: Some(posted.to_string()),
    }
}
