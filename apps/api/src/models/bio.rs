use serde::{Deserialize, Serialize};

/// User-supplied professional details, exactly as submitted by the form.
/// Six free-text fields, no validation and no persistence — consumed once
/// by the prompt builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BioFormData {
    pub fullname: String,
    pub title: String,
    pub company: String,
    pub tags: String,
    pub tone: String,
    pub goal: String,
}
