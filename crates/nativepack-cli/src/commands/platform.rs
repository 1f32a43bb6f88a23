use super::{json_pretty, resolve_platform, EXIT_SUCCESS};

pub fn run(raw: Option<&str>, json: bool) -> Result<u8, String> {
    let platform = resolve_platform(raw)?;
    if json {
        let payload = serde_json::json!({
            "platform": platform,
            "os": platform.os.as_str(),
            "arch": platform.arch.as_str(),
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("{platform}");
    }
    Ok(EXIT_SUCCESS)
}
