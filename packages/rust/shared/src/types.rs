//! Core domain types for extracted curriculum data.
//!
//! The JSON contract requires object keys in order of appearance (program
//! order in a batch, semester order in a document), so the two map-shaped
//! types ([`Semesters`], [`CurriculumCollection`]) are insertion-ordered
//! `Vec`-backed newtypes with hand-written serde impls.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Current schema version for the run manifest format.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper identifying one batch run (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// ProgramInfo
// ---------------------------------------------------------------------------

/// Scalar program metadata pulled from the document's labeled fields.
///
/// An absent field means "label not found in the source text" — never an
/// empty string or zero baked into meaning. Absent fields are omitted from
/// the JSON output entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramInfo {
    /// Program name (label «Программа»).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Field of study (label «Направление»).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Education level (label «Уровень»).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Total credit load (label «Трудоемкость»).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_credits: Option<u32>,
}

impl ProgramInfo {
    /// True when no label matched anywhere in the document.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.direction.is_none()
            && self.level.is_none()
            && self.total_credits.is_none()
    }
}

// ---------------------------------------------------------------------------
// CourseRecord
// ---------------------------------------------------------------------------

/// One extracted discipline entry.
///
/// `number` is a positional/catalog label, only locally meaningful within a
/// semester listing. Invariant: `name` is non-empty after trimming; the
/// counts are non-negative by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Catalog number, when the source line carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Course name.
    pub name: String,
    /// Credit count.
    pub credits: u32,
    /// Hour count.
    pub hours: u32,
}

// ---------------------------------------------------------------------------
// Semesters
// ---------------------------------------------------------------------------

/// Insertion-ordered semester-label → course-list map.
///
/// Labels are the digit strings captured at segment boundaries; they are
/// not required to be numerically contiguous. A pushed label that already
/// exists coalesces by appending its courses to the existing entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Semesters(Vec<(String, Vec<CourseRecord>)>);

impl Semesters {
    /// Empty semester map.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a semester block's courses under `label`, appending when the
    /// label was already seen.
    pub fn push(&mut self, label: impl Into<String>, courses: Vec<CourseRecord>) {
        let label = label.into();
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => existing.extend(courses),
            None => self.0.push((label, courses)),
        }
    }

    /// Courses for a label, if present.
    pub fn get(&self, label: &str) -> Option<&[CourseRecord]> {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| c.as_slice())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CourseRecord])> {
        self.0.iter().map(|(l, c)| (l.as_str(), c.as_slice()))
    }

    /// Number of distinct semester labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no semester boundary was found.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Semesters {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, courses) in &self.0 {
            map.serialize_entry(label, courses)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Semesters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SemestersVisitor;

        impl<'de> Visitor<'de> for SemestersVisitor {
            type Value = Semesters;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of semester label to course list")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut semesters = Semesters::new();
                while let Some((label, courses)) =
                    access.next_entry::<String, Vec<CourseRecord>>()?
                {
                    semesters.push(label, courses);
                }
                Ok(semesters)
            }
        }

        deserializer.deserialize_map(SemestersVisitor)
    }
}

// ---------------------------------------------------------------------------
// CurriculumDocument
// ---------------------------------------------------------------------------

/// The fully extracted structure of one source document.
///
/// Built in a single pass and never mutated afterward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurriculumDocument {
    /// Labeled program metadata.
    pub program_info: ProgramInfo,
    /// Per-semester course listings, in order of appearance.
    pub semesters: Semesters,
}

// ---------------------------------------------------------------------------
// CurriculumCollection
// ---------------------------------------------------------------------------

/// Insertion-ordered program-name → document map accumulated over a batch.
///
/// The program name (derived from the source filename) is the primary key.
/// Insertion is last-write-wins: a colliding key keeps its original position
/// but takes the later document — an accepted, logged collision policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurriculumCollection(Vec<(String, CurriculumDocument)>);

impl CurriculumCollection {
    /// Empty collection.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a document under `name`, replacing any earlier document with
    /// the same derived name (last-write-wins).
    pub fn insert(&mut self, name: impl Into<String>, document: CurriculumDocument) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => {
                tracing::warn!(program = %name, "duplicate program key, overwriting earlier document");
                *existing = document;
            }
            None => self.0.push((name, document)),
        }
    }

    /// Document for a program name, if present.
    pub fn get(&self, name: &str) -> Option<&CurriculumDocument> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, d)| d)
    }

    /// Iterate programs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CurriculumDocument)> {
        self.0.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Number of programs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the batch yielded no documents.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CurriculumCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, document) in &self.0 {
            map.serialize_entry(name, document)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CurriculumCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = CurriculumCollection;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of program name to curriculum document")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut collection = CurriculumCollection::new();
                while let Some((name, document)) =
                    access.next_entry::<String, CurriculumDocument>()?
                {
                    collection.insert(name, document);
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_map(CollectionVisitor)
    }
}

/// Derive the collection key for a source document: strip the file
/// extension and replace underscores with spaces.
pub fn derive_program_key(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    stem.replace('_', " ")
}

// ---------------------------------------------------------------------------
// RunManifest
// ---------------------------------------------------------------------------

/// Metadata for a single artifact file written by the assembler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMeta {
    /// Artifact filename (relative to the output directory).
    pub filename: String,
    /// SHA-256 of the artifact contents.
    pub sha256: String,
    /// Size in bytes.
    pub size_bytes: usize,
}

/// The `manifest.json` structure written beside each artifact set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    /// Unique identifier for this run.
    pub id: RunId,
    /// Directory label the artifacts were derived from.
    pub directory: String,
    /// Tool version that produced the artifacts.
    pub tool_version: String,
    /// When the artifacts were written.
    pub created_at: DateTime<Utc>,
    /// Source documents successfully processed.
    pub document_count: usize,
    /// Programs in the resulting collection.
    pub program_count: usize,
    /// Artifact checksums.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<ArtifactMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(number: Option<&str>, name: &str, credits: u32, hours: u32) -> CourseRecord {
        CourseRecord {
            number: number.map(String::from),
            name: name.into(),
            credits,
            hours,
        }
    }

    #[test]
    fn run_id_roundtrip() {
        let id = RunId::new();
        let s = id.to_string();
        let parsed: RunId = s.parse().expect("parse RunId");
        assert_eq!(id, parsed);
    }

    #[test]
    fn program_info_omits_absent_fields() {
        let info = ProgramInfo {
            name: Some("ИИ".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&info).expect("serialize");
        assert_eq!(json, r#"{"name":"ИИ"}"#);
        assert!(!info.is_empty());
        assert!(ProgramInfo::default().is_empty());
    }

    #[test]
    fn course_record_omits_absent_number() {
        let json = serde_json::to_string(&course(None, "Сети", 3, 108)).expect("serialize");
        assert_eq!(json, r#"{"name":"Сети","credits":3,"hours":108}"#);

        let json =
            serde_json::to_string(&course(Some("1"), "Математика", 4, 144)).expect("serialize");
        assert!(json.starts_with(r#"{"number":"1""#));
    }

    #[test]
    fn semesters_preserve_insertion_order() {
        let mut semesters = Semesters::new();
        semesters.push("2", vec![course(None, "Сети", 3, 108)]);
        semesters.push("1", vec![course(Some("1"), "Математика", 4, 144)]);

        let labels: Vec<&str> = semesters.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["2", "1"]);

        let json = serde_json::to_string(&semesters).expect("serialize");
        assert!(json.find(r#""2":"#).unwrap() < json.find(r#""1":"#).unwrap());
    }

    #[test]
    fn semesters_coalesce_duplicate_labels() {
        let mut semesters = Semesters::new();
        semesters.push("1", vec![course(None, "Сети", 3, 108)]);
        semesters.push("1", vec![course(None, "Базы данных", 4, 144)]);

        assert_eq!(semesters.len(), 1);
        assert_eq!(semesters.get("1").unwrap().len(), 2);
        assert_eq!(semesters.get("1").unwrap()[1].name, "Базы данных");
    }

    #[test]
    fn collection_last_write_wins() {
        let mut collection = CurriculumCollection::new();

        let mut first = CurriculumDocument::default();
        first.program_info.name = Some("first".into());
        let mut second = CurriculumDocument::default();
        second.program_info.name = Some("second".into());

        collection.insert("Искусственный интеллект", first);
        collection.insert("Искусственный интеллект", second);

        assert_eq!(collection.len(), 1);
        assert_eq!(
            collection
                .get("Искусственный интеллект")
                .unwrap()
                .program_info
                .name
                .as_deref(),
            Some("second")
        );
    }

    #[test]
    fn derive_program_key_strips_extension_and_underscores() {
        assert_eq!(
            derive_program_key("Искусственный_интеллект.txt"),
            "Искусственный интеллект"
        );
        assert_eq!(derive_program_key("plain.txt"), "plain");
        assert_eq!(derive_program_key("no_extension"), "no extension");
    }

    #[test]
    fn document_json_shape() {
        let mut semesters = Semesters::new();
        semesters.push("1", vec![course(Some("1"), "Математика", 4, 144)]);
        let document = CurriculumDocument {
            program_info: ProgramInfo {
                name: Some("ИИ".into()),
                ..Default::default()
            },
            semesters,
        };

        let json = serde_json::to_string_pretty(&document).expect("serialize");
        // Non-ASCII preserved literally, absent fields absent.
        assert!(json.contains("Математика"));
        assert!(!json.contains("\\u"));
        assert!(!json.contains("direction"));

        let parsed: CurriculumDocument = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, document);
    }

    #[test]
    fn document_fixture_validates() {
        let fixture = std::fs::read_to_string("../../../fixtures/json/curriculum.fixture.json")
            .expect("read fixture");
        let parsed: CurriculumDocument =
            serde_json::from_str(&fixture).expect("deserialize fixture document");
        assert_eq!(parsed.program_info.name.as_deref(), Some("Искусственный интеллект"));
        assert_eq!(parsed.program_info.total_credits, Some(120));
        assert_eq!(parsed.semesters.len(), 2);
        let labels: Vec<&str> = parsed.semesters.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["1", "2"]);
    }

    #[test]
    fn manifest_serialization() {
        let manifest = RunManifest {
            schema_version: CURRENT_SCHEMA_VERSION,
            id: RunId::new(),
            directory: "pdf_curriculum_ai".into(),
            tool_version: "0.1.0".into(),
            created_at: Utc::now(),
            document_count: 2,
            program_count: 2,
            artifacts: vec![ArtifactMeta {
                filename: "curriculum_data.json".into(),
                sha256: "0".repeat(64),
                size_bytes: 42,
            }],
        };

        let json = serde_json::to_string_pretty(&manifest).expect("serialize");
        let parsed: RunManifest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(parsed.artifacts.len(), 1);
    }
}
