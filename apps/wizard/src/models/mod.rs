pub mod profile;
pub mod resume_file;
pub mod shape;
pub mod stored;

pub use profile::{
    CertificationEntry, EducationEntry, ExperienceEntry, LanguageEntry, ProfileRecord,
    ProjectEntry, PublicationEntry, Section,
};
pub use resume_file::ResumeFile;
pub use stored::ProfileSummary;
