use serde::{Deserialize, Serialize};

/// Location entry that stands for "remote work is acceptable".
pub const REMOTE_LOCATION: &str = "Remote";

/// What the scoring engine consumes. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub sectors: Vec<String>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub education: Option<String>,
}

/// State of the multi-step preference wizard as submitted by the client.
///
/// Only skills, sectors, locations and education reach the engine; the rest is
/// profile metadata carried along for display.
#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PreferenceForm {
    pub full_name: String,
    pub education: String,
    pub interests: Vec<String>,
    pub custom_interest: String,
    pub stream: String,
    pub year: String,
    /// Tags picked from the curated list.
    pub skills: Vec<String>,
    /// Free-typed, comma-separated additions.
    pub custom_skills: String,
    pub sectors: Vec<String>,
    pub pin_code: String,
    pub preferred_locations: Vec<String>,
    pub custom_location: String,
    pub is_rural: bool,
}

impl PreferenceForm {
    pub fn into_preference(self) -> Preference {
        let mut skills: Vec<String> = self
            .skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        skills.extend(split_custom_skills(&self.custom_skills));

        let mut preferred_locations = self.preferred_locations;
        let custom_location = self.custom_location.trim();
        if !custom_location.is_empty() {
            preferred_locations.push(custom_location.to_string());
        }

        let education = Some(self.education.trim().to_string()).filter(|e| !e.is_empty());

        Preference {
            skills,
            sectors: self.sectors,
            preferred_locations,
            education,
        }
    }
}

/// Splits the free-typed skills box on commas, trimming and dropping blanks.
pub fn split_custom_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Curated vocabularies offered by the wizard
// ────────────────────────────────────────────────────────────────────────────

pub const SUGGESTED_SKILLS: &[&str] = &[
    "JavaScript", "TypeScript", "Python", "Java", "C#", "C++", "React", "Node.js",
    "Distributed Systems", "Microservices", "Git", "SQL", "NoSQL", "HTML/CSS",
    "Data Analysis", "Data Science", "Machine Learning", "Statistics", "Pandas",
    "NumPy", "TensorFlow", "PyTorch", "OpenCV", "Spark", "Airflow", "Scala",
    "Kafka", "AWS", "Azure", "OCI", "Docker", "Kubernetes", "CI/CD", "Jenkins",
    "Ansible", "Linux", "UI/UX", "Figma", "Embedded C", "RTOS", "ARM", "CUDA",
    "Verilog", "SystemVerilog", "Graphics", "AutoCAD", "SolidWorks", "FEA",
    "ETABS", "Kotlin", "Android", "Firebase", "IoT", "MQTT", "ROS", "Excel",
    "PowerBI", "Financial Modeling", "Communication", "Leadership",
    "Project Management", "Research", "Content Writing", "Time Management",
];

pub const INTERESTS: &[&str] = &[
    "Web Development", "Machine Learning", "Data Science", "Mobile App Development",
    "Cloud Computing", "Cybersecurity", "DevOps", "AI/ML", "Blockchain",
    "Game Development", "IoT", "Robotics", "AR/VR", "Computer Vision",
];

pub const SECTORS: &[&str] = &[
    "IT Sector", "Healthcare", "Agriculture", "Education", "Public Administration",
    "Finance", "Manufacturing", "Tourism", "Environment", "Social Work",
    "E-commerce", "Media", "Non-Profit", "Government",
];

pub const POPULAR_CITIES: &[&str] = &[
    "Mumbai", "Delhi", "Bangalore", "Hyderabad", "Pune", "Chennai", "Kolkata",
    "Ahmedabad", "Jaipur", "Lucknow", "Chandigarh", "Kochi", "Indore", "Bhopal",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_skills_are_split_and_trimmed() {
        assert_eq!(
            split_custom_skills(" Rust ,  Go,,  , SQL "),
            vec!["Rust".to_string(), "Go".to_string(), "SQL".to_string()]
        );
    }

    #[test]
    fn test_form_merges_curated_and_custom_skills() {
        let form = PreferenceForm {
            skills: vec!["Python".to_string()],
            custom_skills: "Excel, Tableau".to_string(),
            ..PreferenceForm::default()
        };
        let preference = form.into_preference();
        assert_eq!(preference.skills, vec!["Python", "Excel", "Tableau"]);
    }

    #[test]
    fn test_custom_location_is_appended() {
        let form = PreferenceForm {
            preferred_locations: vec![REMOTE_LOCATION.to_string()],
            custom_location: "  Nagpur ".to_string(),
            ..PreferenceForm::default()
        };
        let preference = form.into_preference();
        assert_eq!(preference.preferred_locations, vec!["Remote", "Nagpur"]);
    }

    #[test]
    fn test_blank_education_becomes_none() {
        let form = PreferenceForm {
            education: "   ".to_string(),
            ..PreferenceForm::default()
        };
        assert_eq!(form.into_preference().education, None);
    }

    #[test]
    fn test_auxiliary_fields_do_not_leak_into_preference() {
        let form = PreferenceForm {
            full_name: "Asha".to_string(),
            pin_code: "560001".to_string(),
            is_rural: true,
            interests: vec!["Robotics".to_string()],
            ..PreferenceForm::default()
        };
        assert_eq!(form.into_preference(), Preference::default());
    }

    #[test]
    fn test_form_deserializes_with_missing_fields() {
        let form: PreferenceForm =
            serde_json::from_str(r#"{"sectors": ["Finance"], "is_rural": true}"#).unwrap();
        assert_eq!(form.sectors, vec!["Finance"]);
        assert!(form.is_rural);
        assert!(form.skills.is_empty());
    }
}
