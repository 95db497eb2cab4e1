// Output naming
//
// Artifacts are keyed by the first 8 characters of the job id.

use serde_json::{json, Value};

/// Length of the job id prefix used in artifact names
pub const SHORT_ID_LEN: usize = 8;

/// Node id under which the image outputs are reported
pub const OUTPUT_NODE_ID: &str = "9";

/// First `SHORT_ID_LEN` characters of a job id (the whole id if shorter)
pub fn short_id(job_id: &str) -> &str {
    match job_id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &job_id[..idx],
        None => job_id,
    }
}

/// Image file name reported to clients, e.g. `1a2b3c4d.png`
pub fn image_filename(job_id: &str) -> String {
    format!("{}.png", short_id(job_id))
}

/// Artifact file name written to the output directory, e.g. `output_1a2b3c4d.jpg`
pub fn artifact_filename(job_id: &str) -> String {
    format!("output_{}.jpg", short_id(job_id))
}

/// Output document stored as a completed job's result
pub fn image_outputs(job_id: &str) -> Value {
    json!({
        OUTPUT_NODE_ID: {
            "images": [{
                "filename": image_filename(job_id),
                "subfolder": "",
                "type": "output",
            }]
        }
    })
}
