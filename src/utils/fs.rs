//! IO helper: raw text read/write for the input area

use std::{fs, path::Path};

use crate::model::actions::AppError;

/// 读取文件的原始文本（不做JSON解析，解析留给后续动作）
pub fn read_text_file(p: &Path) -> Result<String, AppError> {
    Ok(fs::read_to_string(p)?)
}

/// 将文本写入文件
pub fn write_text_file(p: &Path, text: &str) -> Result<(), AppError> {
    fs::write(p, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_text_round_trip() {
        let mut file = tempfile::NamedTempFile::new().expect("创建临时文件失败");
        file.write_all("{\"a\": 1}\n".as_bytes()).expect("写入失败");

        let text = read_text_file(file.path()).expect("读取应该成功");
        assert_eq!(text, "{\"a\": 1}\n");

        let out = tempfile::NamedTempFile::new().unwrap();
        write_text_file(out.path(), &text).expect("写入应该成功");
        assert_eq!(read_text_file(out.path()).unwrap(), text);
    }

    #[test]
    fn test_invalid_json_text_loads_verbatim() {
        // 打开文件不解析JSON，非法内容也应原样载入
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{bad json}").unwrap();
        assert_eq!(read_text_file(file.path()).unwrap(), "{bad json}");
    }
}
