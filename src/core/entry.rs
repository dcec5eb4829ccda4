use crate::adapters::storage::LocalStorage;
use crate::domain::model::DomainTarget;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

pub const REGISTRY_FILE: &str = "registry_response.json";
pub const REGISTRAR_FILE: &str = "registrar_response.json";

/// Writes lookup results to `<root>/<first letter>/<domain>/`.
/// Existing files are replaced without warning.
pub struct EntryWriter<S: Storage> {
    storage: S,
    root: PathBuf,
}

impl EntryWriter<LocalStorage> {
    pub fn local(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self::new(LocalStorage::new(root.clone()), root)
    }
}

impl<S: Storage> EntryWriter<S> {
    /// `root` is where `storage` is rooted; it is only used to report locations.
    pub fn new(storage: S, root: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            root: root.into(),
        }
    }

    pub fn location(&self, domain: &DomainTarget) -> PathBuf {
        self.root.join(domain.shard()).join(domain.name())
    }

    pub async fn write_registry(&self, domain: &DomainTarget, registry: &Value) -> Result<PathBuf> {
        self.write_json(domain, REGISTRY_FILE, registry).await
    }

    pub async fn write_registrar(&self, domain: &DomainTarget, registrar: &Value) -> Result<PathBuf> {
        self.write_json(domain, REGISTRAR_FILE, registrar).await
    }

    /// Writes both responses; the registrar file only when one was found.
    pub async fn write(
        &self,
        domain: &DomainTarget,
        registry: &Value,
        registrar: Option<&Value>,
    ) -> Result<PathBuf> {
        self.write_registry(domain, registry).await?;
        if let Some(registrar) = registrar {
            self.write_registrar(domain, registrar).await?;
        }
        Ok(self.location(domain))
    }

    async fn write_json(&self, domain: &DomainTarget, file: &str, value: &Value) -> Result<PathBuf> {
        let relative = entry_file(domain, file);
        let content = format_json(value)?;
        self.storage.write_file(&relative, content.as_bytes()).await?;
        tracing::debug!("Wrote {} ({} bytes)", relative, content.len());
        Ok(self.root.join(relative))
    }
}

fn entry_file(domain: &DomainTarget, file: &str) -> String {
    format!("{}/{}/{}", domain.shard(), domain.name(), file)
}

/// Pretty-printed with two-space indentation, keys sorted at every level
/// and everything outside printable ASCII written as `\uXXXX` escapes.
pub fn format_json(value: &Value) -> Result<String> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, AsciiFormatter::default());
    sort_keys(value).serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// `PrettyFormatter` that escapes non-ASCII (and DEL) as UTF-16 `\uXXXX` units.
#[derive(Default)]
struct AsciiFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl Formatter for AsciiFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if c.is_ascii() && c != '\u{7f}' {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, Value> =
                map.iter().map(|(k, v)| (k, sort_keys(v))).collect();
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), v))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RdapError;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                RdapError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_format_json_sorts_keys_with_two_space_indent() {
        let value = json!({"b": 1, "a": {"d": [true, {"z": null, "y": "x"}], "c": 2}});
        let expected = "{\n  \"a\": {\n    \"c\": 2,\n    \"d\": [\n      true,\n      {\n        \"y\": \"x\",\n        \"z\": null\n      }\n    ]\n  },\n  \"b\": 1\n}";
        assert_eq!(format_json(&value).unwrap(), expected);
    }

    #[test]
    fn test_format_json_escapes_non_ascii() {
        let value = json!({"fn": "阿里云计算有限公司", "note": "café \u{1F600}", "ascii": "a~\u{7f}"});
        let formatted = format_json(&value).unwrap();

        assert!(formatted.is_ascii());
        assert!(formatted.contains(r#""fn": "\u963f\u91cc\u4e91\u8ba1\u7b97\u6709\u9650\u516c\u53f8""#));
        assert!(formatted.contains(r#""note": "caf\u00e9 \ud83d\ude00""#));
        assert!(formatted.contains(r#""ascii": "a~\u007f""#));
        assert_eq!(serde_json::from_str::<Value>(&formatted).unwrap(), value);
    }

    #[test]
    fn test_format_json_keeps_empty_containers_inline() {
        let formatted = format_json(&json!({"links": [], "remarks": {}})).unwrap();
        assert_eq!(formatted, "{\n  \"links\": [],\n  \"remarks\": {}\n}");
    }

    #[tokio::test]
    async fn test_registrar_file_only_written_when_present() {
        let storage = MockStorage::new();
        let writer = EntryWriter::new(storage.clone(), "entries");
        let domain = DomainTarget::parse("Example.com").unwrap();

        let location = writer.write(&domain, &json!({"handle": "D1"}), None).await.unwrap();

        assert_eq!(location, PathBuf::from("entries/e/Example.com"));
        assert!(storage
            .get_file("e/Example.com/registry_response.json")
            .await
            .is_some());
        assert!(storage
            .get_file("e/Example.com/registrar_response.json")
            .await
            .is_none());

        writer
            .write(&domain, &json!({"handle": "D1"}), Some(&json!({"handle": "R1"})))
            .await
            .unwrap();
        let registrar = storage
            .get_file("e/Example.com/registrar_response.json")
            .await
            .unwrap();
        assert_eq!(registrar, b"{\n  \"handle\": \"R1\"\n}");
    }

    #[tokio::test]
    async fn test_local_entry_is_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("entries");
        let writer = EntryWriter::local(&root);
        let domain = DomainTarget::parse("example.com").unwrap();

        writer.write_registry(&domain, &json!({"v": 1})).await.unwrap();
        let path = writer.write_registry(&domain, &json!({"v": 2})).await.unwrap();

        assert_eq!(path, root.join("e/example.com").join(REGISTRY_FILE));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{\n  \"v\": 2\n}");
    }
}
