// Saving and showing generated images
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Local};
use genai_llm::{ImageGenerationRequest, ImageGenerationResponse};

use crate::error::DemoError;

pub const IMAGE_PROMPT: &str =
    "A futuristic robot coding on a laptop in a coffee shop, digital art style with warm lighting";

pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

pub const PROMPT_IDEAS: [&str; 3] = [
    "A serene mountain landscape at sunset, oil painting style",
    "A cute cartoon cat wearing glasses reading a book",
    "Abstract geometric patterns in blue and gold, modern art style",
];

pub fn image_request(model: &str, prompt: &str) -> ImageGenerationRequest {
    ImageGenerationRequest::new(model, prompt)
}

pub fn generated_file_name(now: DateTime<Local>) -> String {
    format!("generated-image-{}.png", now.format("%Y%m%d-%H%M%S"))
}

/// The desktop when the platform has one, the working directory otherwise
pub fn output_dir() -> Result<PathBuf, DemoError> {
    match dirs::desktop_dir().filter(|dir| dir.is_dir()) {
        Some(dir) => Ok(dir),
        None => Ok(std::env::current_dir()?),
    }
}

/// First image of the response, decoded
pub fn first_image_bytes(response: &ImageGenerationResponse) -> Result<Vec<u8>, DemoError> {
    let image = response
        .data
        .first()
        .ok_or_else(|| DemoError::InvalidResponse("no image in the response".to_string()))?;
    Ok(image.bytes()?)
}

pub fn save_image(bytes: &[u8], dir: &Path, now: DateTime<Local>) -> Result<PathBuf, DemoError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(generated_file_name(now));
    fs::write(&path, bytes)?;
    tracing::info!(target: "genai::imaging", path = %path.display(), size = bytes.len(), "image saved");
    Ok(path)
}

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.arg("/C").arg("start").arg("").arg(path);
        command
    } else if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}

/// Hand the file to the platform's default viewer without waiting for it
pub fn open_in_viewer(path: &Path) -> Result<(), DemoError> {
    viewer_command(path).spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap()
    }

    #[test]
    fn test_file_name_format() {
        assert_eq!(generated_file_name(fixed_time()), "generated-image-20240309-070502.png");
    }

    #[test]
    fn test_save_image() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out");
        let path = save_image(&[0x89, b'P', b'N', b'G'], &target, fixed_time()).unwrap();

        assert_eq!(path, target.join("generated-image-20240309-070502.png"));
        assert_eq!(fs::read(&path).unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_first_image_bytes() {
        let response: ImageGenerationResponse =
            serde_json::from_value(json!({ "created": 1, "data": [{ "b64_json": "AQID" }] })).unwrap();
        assert_eq!(first_image_bytes(&response).unwrap(), vec![1, 2, 3]);

        let empty: ImageGenerationResponse = serde_json::from_value(json!({ "data": [] })).unwrap();
        assert!(matches!(first_image_bytes(&empty), Err(DemoError::InvalidResponse(_))));
    }

    #[test]
    fn test_image_request_defaults() {
        let request = image_request(DEFAULT_IMAGE_MODEL, IMAGE_PROMPT);
        assert_eq!(request.model, "dall-e-3");
        assert_eq!(request.n, 1);
    }

    #[test]
    fn test_output_dir_exists() {
        assert!(output_dir().unwrap().is_dir());
    }
}
