// Profile data pipeline: date normalization, collection editing, parsed-resume
// translation and the submit/hydrate conversions at the API boundary.

pub mod collection;
pub mod dates;
pub mod rules;
pub mod submission;
pub mod translate;

pub use dates::{CalendarDateNormalizer, DateNormalizer, DateStrategy, MonthYearNormalizer};
pub use submission::{hydrate_stored, prepare_for_submission, SubmissionPayload};
pub use translate::{ProfilePatch, SchemaTranslator};
