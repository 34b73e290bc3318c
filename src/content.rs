//! The portfolio itself: the text shown when a section is open.

use std::fmt::Write;

use serde::Deserialize;

use crate::model::Section;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Personal {
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub bio: String,
    pub location: String,
    pub email: String,
    #[serde(default)]
    pub links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Percent
    pub level: u8,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Job {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Degree {
    pub institution: String,
    pub degree: String,
    pub duration: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Experiment {
    pub title: String,
    pub description: String,
    pub complexity: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortfolioContent {
    pub personal: Personal,
    pub skills: Vec<Skill>,
    pub experience: Vec<Job>,
    pub projects: Vec<Project>,
    pub education: Vec<Degree>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub playground: Vec<Experiment>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for PortfolioContent {
    fn default() -> Self {
        let skill = |name: &str, level, category: &str| Skill {
            name: name.to_owned(),
            level,
            category: category.to_owned(),
        };
        let project = |title: &str, description: &str, technologies: &[&str], featured| Project {
            title: title.to_owned(),
            description: description.to_owned(),
            technologies: strings(technologies),
            featured,
        };

        PortfolioContent {
            personal: Personal {
                name: "Alex Cosmos".to_owned(),
                title: "Full Stack Developer & 3D Artist".to_owned(),
                tagline: "Exploring the digital universe, one project at a time".to_owned(),
                bio: "I'm a passionate developer who loves creating immersive digital experiences. \
                      With expertise in modern web technologies and 3D visualization, I bring ideas \
                      to life through code and creativity."
                    .to_owned(),
                location: "San Francisco, CA".to_owned(),
                email: "alex.cosmos@example.com".to_owned(),
                links: strings(&[
                    "https://github.com/alexcosmos",
                    "https://linkedin.com/in/alexcosmos",
                    "https://alexcosmos.dev",
                ]),
            },
            skills: vec![
                skill("JavaScript", 95, "Frontend"),
                skill("React", 92, "Frontend"),
                skill("Three.js", 88, "3D Graphics"),
                skill("Node.js", 85, "Backend"),
                skill("Python", 80, "Backend"),
                skill("WebGL", 78, "3D Graphics"),
                skill("MongoDB", 82, "Database"),
                skill("PostgreSQL", 75, "Database"),
                skill("Docker", 70, "DevOps"),
                skill("AWS", 72, "Cloud"),
                skill("Blender", 65, "3D Graphics"),
                skill("Unity", 60, "Game Dev"),
            ],
            experience: vec![
                Job {
                    company: "Stellar Dynamics".to_owned(),
                    position: "Senior Full Stack Developer".to_owned(),
                    duration: "2022 - Present".to_owned(),
                    description: "Lead developer for immersive web experiences using React and Three.js.".to_owned(),
                    achievements: strings(&[
                        "Developed 3D product visualization platform serving 1M+ users",
                        "Led team of 5 developers in agile environment",
                    ]),
                },
                Job {
                    company: "Cosmic Labs".to_owned(),
                    position: "Frontend Developer".to_owned(),
                    duration: "2020 - 2022".to_owned(),
                    description: "Interactive data visualizations and 3D web applications for research institutions.".to_owned(),
                    achievements: strings(&["Built interactive galaxy simulation for NASA research"]),
                },
                Job {
                    company: "Digital Nebula".to_owned(),
                    position: "Junior Web Developer".to_owned(),
                    duration: "2018 - 2020".to_owned(),
                    description: "Responsive web design and modern JavaScript frameworks.".to_owned(),
                    achievements: strings(&["Developed responsive websites for 50+ clients"]),
                },
            ],
            projects: vec![
                project(
                    "Galactic Explorer",
                    "An interactive 3D space exploration game with procedurally generated planets.",
                    &["Three.js", "React", "WebGL"],
                    true,
                ),
                project(
                    "Cosmic Data Visualizer",
                    "A tool for visualizing astronomical data in 3D space.",
                    &["D3.js", "Three.js", "Python"],
                    true,
                ),
                project(
                    "Stellar Portfolio",
                    "A portfolio inspired by the solar system; each planet is a section.",
                    &["React", "Three.js", "WebGL"],
                    true,
                ),
                project(
                    "Quantum Commerce",
                    "E-commerce platform with 3D product visualization.",
                    &["React", "Three.js", "PostgreSQL"],
                    false,
                ),
                project(
                    "Neural Network Visualizer",
                    "Shows data flow and learning in a neural network as it trains.",
                    &["Three.js", "TensorFlow.js"],
                    false,
                ),
                project(
                    "Cosmic Weather",
                    "Weather app with a 3D Earth showing global weather patterns.",
                    &["Three.js", "React"],
                    false,
                ),
            ],
            education: vec![
                Degree {
                    institution: "Stanford University".to_owned(),
                    degree: "Master of Science in Computer Science".to_owned(),
                    duration: "2016 - 2018".to_owned(),
                    achievements: strings(&["Thesis: Real-time Procedural Planet Generation"]),
                },
                Degree {
                    institution: "UC Berkeley".to_owned(),
                    degree: "Bachelor of Science in Computer Science".to_owned(),
                    duration: "2012 - 2016".to_owned(),
                    achievements: strings(&["Summa Cum Laude"]),
                },
            ],
            certifications: vec![
                Certification {
                    name: "AWS Solutions Architect".to_owned(),
                    issuer: "Amazon Web Services".to_owned(),
                    date: "2023".to_owned(),
                },
                Certification {
                    name: "Three.js Certified Developer".to_owned(),
                    issuer: "Three.js Foundation".to_owned(),
                    date: "2022".to_owned(),
                },
            ],
            playground: vec![
                Experiment {
                    title: "Particle Galaxy".to_owned(),
                    description: "Thousands of particles swirling under simulated gravity.".to_owned(),
                    complexity: "Advanced".to_owned(),
                },
                Experiment {
                    title: "Shader Nebula".to_owned(),
                    description: "Procedural clouds rendered entirely in a fragment shader.".to_owned(),
                    complexity: "Expert".to_owned(),
                },
            ],
        }
    }
}

impl PortfolioContent {
    /// Plain text for the content panel.
    pub fn summary(&self, section: Section) -> String {
        // Writing into a String can't fail
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", section.title());

        match section {
            Section::About => {
                let p = &self.personal;
                let _ = writeln!(out, "{}\n{}\n{}\n\n{}", p.name, p.title, p.tagline, p.bio);
            }
            Section::Skills => {
                for skill in self.skills.iter() {
                    let _ = writeln!(out, "{:<12} {:>3}%  ({})", skill.name, skill.level, skill.category);
                }
            }
            Section::Experience => {
                for job in self.experience.iter() {
                    let _ = writeln!(out, "{} @ {} ({})", job.position, job.company, job.duration);
                    let _ = writeln!(out, "  {}", job.description);
                    for achievement in job.achievements.iter() {
                        let _ = writeln!(out, "  - {}", achievement);
                    }
                }
            }
            Section::Projects => {
                for project in self.projects.iter() {
                    let star = if project.featured { "*" } else { " " };
                    let _ = writeln!(out, "{} {}: {}", star, project.title, project.description);
                    if !project.technologies.is_empty() {
                        let _ = writeln!(out, "    [{}]", project.technologies.join(", "));
                    }
                }
            }
            Section::Education => {
                for degree in self.education.iter() {
                    let _ = writeln!(out, "{}, {} ({})", degree.degree, degree.institution, degree.duration);
                    for achievement in degree.achievements.iter() {
                        let _ = writeln!(out, "  - {}", achievement);
                    }
                }
                for cert in self.certifications.iter() {
                    let _ = writeln!(out, "{} - {} ({})", cert.name, cert.issuer, cert.date);
                }
            }
            Section::Contact => {
                let p = &self.personal;
                let _ = writeln!(out, "{}\n{}", p.email, p.location);
                for link in p.links.iter() {
                    let _ = writeln!(out, "{}", link);
                }
            }
            Section::Playground => {
                for experiment in self.playground.iter() {
                    let _ = writeln!(out, "{} [{}]: {}", experiment.title, experiment.complexity, experiment.description);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SECTION_ORDER;

    #[test]
    fn test_every_section_has_a_summary() {
        let content = PortfolioContent::default();
        for section in SECTION_ORDER {
            let text = content.summary(section);
            assert!(text.starts_with(&format!("== {} ==", section.title())));
            assert!(text.lines().count() > 1, "{:?} is empty", section);
        }
    }

    #[test]
    fn test_partial_content_from_json5() {
        let text = r#"{
            personal: {
                name: "Sam", title: "Dev", tagline: "", bio: "",
                location: "Earth", email: "sam@example.com",
            },
            skills: [{ name: "Rust", level: 90, category: "Systems" }],
            experience: [],
            projects: [],
            education: [],
        }"#;
        let content: PortfolioContent = json5::from_str(text).unwrap();
        assert!(content.summary(Section::Skills).contains("Rust"));
        assert!(content.playground.is_empty());
    }
}
