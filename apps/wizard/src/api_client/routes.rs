// Endpoint paths, relative to the configured API base URL.

pub const PARSE_RESUME: &str = "/profiles/parse-resume";
pub const UPLOAD_RESUME: &str = "/profiles/upload-resume";
pub const CREATE_PROFILE: &str = "/profiles/createprofile";

/// Multipart field carrying the resume for both parse and upload.
pub const RESUME_FIELD: &str = "resume";

pub fn update_profile(profile_id: &str) -> String {
    format!("/profiles/updateprofile/{profile_id}")
}

pub fn get_profile(profile_id: &str) -> String {
    format!("/profiles/getprofile/{profile_id}")
}

pub fn list_profiles(user_id: &str) -> String {
    format!("/profiles/getprofiles/{user_id}")
}

pub fn delete_profile(profile_id: &str) -> String {
    format!("/profiles/deleteprofile/{profile_id}")
}

/// Joins a base URL and a path without doubling or dropping the slash.
pub fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_normalizes_slashes() {
        assert_eq!(
            join("http://api.local/", "/profiles/createprofile"),
            "http://api.local/profiles/createprofile"
        );
        assert_eq!(
            join("http://api.local/v1", &get_profile("p1")),
            "http://api.local/v1/profiles/getprofile/p1"
        );
    }
}
