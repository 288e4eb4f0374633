//! Clipboard  cross-platform clipboard helpers

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard error: {0}")]
    Clip(String),
}

/// 将文本复制到系统剪贴板
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    use copypasta::{ClipboardContext, ClipboardProvider};
    let mut ctx = ClipboardContext::new().map_err(|e| ClipboardError::Clip(e.to_string()))?;
    ctx.set_contents(text.to_string())
        .map_err(|e| ClipboardError::Clip(e.to_string()))
}

/// 从系统剪贴板获取文本（用于测试）
#[cfg(test)]
pub fn get_clipboard_contents() -> Result<String, ClipboardError> {
    use copypasta::{ClipboardContext, ClipboardProvider};
    let mut ctx = ClipboardContext::new().map_err(|e| ClipboardError::Clip(e.to_string()))?;
    ctx.get_contents()
        .map_err(|e| ClipboardError::Clip(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_json_text() {
        let json_text = r#"{"a": 1, "b": [true, null]}"#;

        let copy_result = copy_to_clipboard(json_text);
        assert!(copy_result.is_ok(), "复制JSON文本应该成功");

        let clipboard_content = get_clipboard_contents().expect("读取剪贴板应该成功");
        assert_eq!(clipboard_content, json_text, "剪贴板内容应与复制的文本一致");
    }

    #[test]
    fn test_copy_pretty_printed_text() {
        // 多行缩进文本（格式化结果）应原样进出剪贴板
        let pretty = "{\n  \"名称\": \"树视图\"\n}";

        assert!(copy_to_clipboard(pretty).is_ok());
        assert_eq!(get_clipboard_contents().unwrap(), pretty, "应保留换行与缩进");
    }
}
