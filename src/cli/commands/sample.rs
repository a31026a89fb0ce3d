//! `appraise sample` - print a sample control description.

use anyhow::Result;

/// Sample control description for trying the pipeline without real data.
pub const SAMPLE_CONTROL: &str =
    "Multi-factor authentication is enforced for all financial systems. Access \
     permissions are reviewed quarterly by the IT security team, and any account \
     inactive for 90 days is automatically disabled. Review outcomes are logged \
     and reported to the audit committee.";

pub async fn execute(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({ "control": SAMPLE_CONTROL }));
    } else {
        println!("{SAMPLE_CONTROL}");
    }
    Ok(())
}
