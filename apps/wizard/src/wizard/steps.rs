// Wizard steps in presentation order. Navigation is by index into STEPS.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const fn step(id: &'static str, title: &'static str, description: &'static str) -> Step {
    Step {
        id,
        title,
        description,
    }
}

pub const STEPS: [Step; 11] = [
    step("basic", "Personal Info", "Your name, contact, and social links"),
    step("location", "Location & Skills", "Address and key competencies"),
    step(
        "professional",
        "Professional Details",
        "Experience, CTC, and preferences",
    ),
    step("experience", "Work Experience", "Your detailed work history"),
    step("education", "Education", "Educational background"),
    step("projects", "Projects", "Portfolio of your work"),
    step("publications", "Publications", "Published articles or papers"),
    step(
        "certifications",
        "Certifications & Languages",
        "Licenses and language skills",
    ),
    step(
        "demographics",
        "Demographics (Optional)",
        "Optional diversity information",
    ),
    step("achievements", "Achievements", "List your key achievements"),
    step("review", "Review & Submit", "Final review of your profile"),
];

pub const LAST_STEP: usize = STEPS.len() - 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_unique() {
        let ids: std::collections::HashSet<_> = STEPS.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), STEPS.len());
    }

    #[test]
    fn test_order_endpoints() {
        assert_eq!(STEPS[0].title, "Personal Info");
        assert_eq!(STEPS[LAST_STEP].id, "review");
        assert_eq!(STEPS[3].id, "experience");
        assert_eq!(STEPS.len(), 11);
    }
}
