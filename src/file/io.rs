//! ファイルI/O操作
//!
//! ファイルを文書へ読み込み、文書を行区切り付きでファイルへ保存する

use crate::buffer::{Document, Limits};
use crate::error::{FileError, KeError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 行区切り文字
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }

    /// 最初の行区切りから種類を判定（区切りがなければ `None`）
    pub fn detect(content: &str) -> Option<LineEnding> {
        let idx = content.find('\n')?;
        if content[..idx].ends_with('\r') {
            Some(LineEnding::Crlf)
        } else {
            Some(LineEnding::Lf)
        }
    }
}

/// 読み込み結果
#[derive(Debug, Clone)]
pub struct LoadedFile {
    /// 文書
    pub document: Document,
    /// 元ファイルの行区切り（新規ファイルや1行のみなら `None`）
    pub line_ending: Option<LineEnding>,
    /// ファイルが既に存在したか
    pub existed: bool,
}

/// ファイルを文書として読み込む
///
/// 存在しないパスは空行1行の新規文書になる
pub fn load_document(path: &Path, limits: Limits) -> Result<LoadedFile> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("{} does not exist, starting with an empty buffer", path.display());
            return Ok(LoadedFile {
                document: Document::new(limits),
                line_ending: None,
                existed: false,
            });
        }
        // 親ディレクトリが読めない等は新規ファイル扱いにしない
        Err(e) => return Err(FileError::from_io(&e, path).into()),
    };

    if metadata.is_dir() {
        return Err(FileError::InvalidPath {
            path: path.display().to_string(),
        }
        .into());
    }

    let raw = fs::read(path).map_err(|e| FileError::from_io(&e, path))?;
    let content = decode(&raw)?;
    let line_ending = LineEnding::detect(content);

    let document = Document::from_text(content, limits).map_err(|err| FileError::TooLarge {
        message: format!("{}: {}", path.display(), err),
    })?;

    log::debug!(
        "loaded {} ({} rows, {:?})",
        path.display(),
        document.row_count(),
        line_ending
    );
    Ok(LoadedFile {
        document,
        line_ending,
        existed: true,
    })
}

/// 文書をファイルへ保存し、書き込んだバイト数を返す
///
/// 行は区切り文字で連結し、最終行の後ろには付けない。
/// 一時ファイルに書き込んでから置き換える。
pub fn save_document(path: &Path, document: &Document, line_ending: LineEnding) -> Result<usize> {
    let content = document.to_text(line_ending.as_str());

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, content.as_bytes()).map_err(|e| FileError::from_io(&e, path))?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(FileError::from_io(&e, path).into());
    }

    log::info!("saved {} ({} bytes)", path.display(), content.len());
    Ok(content.len())
}

/// `~` と環境変数を展開したパス
pub fn expand_path(path: &str) -> Result<PathBuf> {
    shellexpand::full(path)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| {
            KeError::File(FileError::InvalidPath {
                path: format!("{}: {}", path, e),
            })
        })
}

/// UTF-8 として解釈し BOM を取り除く
fn decode(raw: &[u8]) -> Result<&str> {
    let content = std::str::from_utf8(raw).map_err(|e| FileError::Encoding {
        message: format!("file must be UTF-8: {}", e),
    })?;
    Ok(content.strip_prefix('\u{FEFF}').unwrap_or(content))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".ke-tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Line;
    use tempfile::tempdir;

    fn rows(document: &Document) -> Vec<String> {
        document.rows().iter().map(Line::to_string).collect()
    }

    #[test]
    fn test_missing_file_loads_as_single_empty_row() {
        let dir = tempdir().unwrap();
        let loaded = load_document(&dir.path().join("new.txt"), Limits::default()).unwrap();
        assert!(!loaded.existed);
        assert_eq!(rows(&loaded.document), vec![""]);
        assert_eq!(loaded.line_ending, None);
    }

    #[test]
    fn test_load_crlf_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crlf.txt");
        fs::write(&path, "one\r\ntwo\r\n").unwrap();

        let loaded = load_document(&path, Limits::default()).unwrap();
        assert!(loaded.existed);
        assert_eq!(rows(&loaded.document), vec!["one", "two", ""]);
        assert_eq!(loaded.line_ending, Some(LineEnding::Crlf));
    }

    #[test]
    fn test_save_round_trip_is_exact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("round.txt");
        for original in ["a\r\nb\r\n", "a\r\nb", "", "single"] {
            fs::write(&path, original).unwrap();
            let loaded = load_document(&path, Limits::default()).unwrap();
            save_document(&path, &loaded.document, LineEnding::Crlf).unwrap();
            assert_eq!(fs::read_to_string(&path).unwrap(), original);
        }
    }

    #[test]
    fn test_save_uses_requested_terminator() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lf.txt");
        let document = Document::from_text("x\ny", Limits::default()).unwrap();

        let written = save_document(&path, &document, LineEnding::Lf).unwrap();
        assert_eq!(written, 3);
        assert_eq!(fs::read_to_string(&path).unwrap(), "x\ny");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("f.txt");
        let err = save_document(&path, &Document::default(), LineEnding::Lf).unwrap_err();
        assert!(matches!(err, KeError::File(FileError::NotFound { .. })));
    }

    #[test]
    fn test_load_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bin.dat");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            load_document(&path, Limits::default()),
            Err(KeError::File(FileError::Encoding { .. }))
        ));
    }

    #[test]
    fn test_load_rejects_oversized_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, "a\nb\nc\n").unwrap();
        assert!(matches!(
            load_document(&path, Limits::new(3, 10)),
            Err(KeError::File(FileError::TooLarge { .. }))
        ));
    }

    #[test]
    fn test_load_strips_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        fs::write(&path, "\u{FEFF}hi").unwrap();
        let loaded = load_document(&path, Limits::default()).unwrap();
        assert_eq!(rows(&loaded.document), vec!["hi"]);
    }

    #[test]
    fn test_load_directory_is_invalid_path() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_document(dir.path(), Limits::default()),
            Err(KeError::File(FileError::InvalidPath { .. }))
        ));
    }

    #[test]
    fn test_unreadable_path_is_not_treated_as_new_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        // 通常ファイルの下のパスは NotFound ではなく ENOTDIR になる
        let result = load_document(&file.join("child.txt"), Limits::default());
        assert!(matches!(result, Err(KeError::File(_))));
    }

    #[test]
    fn test_detect_line_ending() {
        assert_eq!(LineEnding::detect("a\r\nb"), Some(LineEnding::Crlf));
        assert_eq!(LineEnding::detect("a\nb\r\n"), Some(LineEnding::Lf));
        assert_eq!(LineEnding::detect("abc"), None);
    }

    #[test]
    fn test_expand_path_plain() {
        assert_eq!(expand_path("notes.txt").unwrap(), PathBuf::from("notes.txt"));
    }
}
