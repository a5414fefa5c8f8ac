// record.rs — TraceRecord: one accepted file mutation and its provenance.
//
// Records are nested the way agent-trace consumers expect:
//
//   record -> files[] -> conversations[] -> ranges[] + related[]
//
// The gate only ever writes one file with one conversation and one range
// per record, but the shape leaves room for multi-file mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::hasher;

/// Trace format version written into every record.
pub const TRACE_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Fresh UUID per record. Older ledgers wrote this field as `id`.
    #[serde(alias = "id")]
    pub record_id: Uuid,

    pub timestamp: DateTime<Utc>,

    pub version: String,

    pub vcs: VcsInfo,

    pub files: Vec<FileTrace>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VcsInfo {
    #[serde(rename = "type")]
    pub kind: String,

    /// Serialized as `null` when the revision could not be determined.
    pub revision: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTrace {
    pub relative_path: String,
    pub conversations: Vec<Conversation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub contributor: Contributor,
    pub intent_id: String,
    pub mutation_class: String,
    pub ranges: Vec<LineRange>,
    pub related: Vec<Related>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub entity_type: String,
    pub model_identifier: String,
}

/// 1-based inclusive line range with the hash of the content it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start_line: usize,
    pub end_line: usize,
    pub content_hash: String,
}

impl LineRange {
    /// Range covering the whole of `content`.
    ///
    /// The line count is the number of `'\n'`-separated segments, so a
    /// trailing newline counts as an extra (empty) line.
    pub fn whole(content: &str) -> Self {
        Self {
            start_line: 1,
            end_line: content.split('\n').count(),
            content_hash: hasher::content_hash(content),
        }
    }
}

/// Typed link from a conversation to something that governs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Related {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Related {
    pub fn intent(id: impl Into<String>) -> Self {
        Self {
            kind: "intent".to_string(),
            value: id.into(),
        }
    }

    pub fn specification(tag: impl Into<String>) -> Self {
        Self {
            kind: "specification".to_string(),
            value: tag.into(),
        }
    }
}

impl TraceRecord {
    /// Build a single-file, single-range record stamped with a new id and
    /// the current time.
    pub fn for_write(
        path: &str,
        content: &str,
        intent_id: &str,
        mutation_class: &str,
        contributor: Contributor,
        specification_tag: &str,
        revision: Option<String>,
    ) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            version: TRACE_VERSION.to_string(),
            vcs: VcsInfo {
                kind: "git".to_string(),
                revision,
            },
            files: vec![FileTrace {
                relative_path: path.to_string(),
                conversations: vec![Conversation {
                    contributor,
                    intent_id: intent_id.to_string(),
                    mutation_class: mutation_class.to_string(),
                    ranges: vec![LineRange::whole(content)],
                    related: vec![
                        Related::intent(intent_id),
                        Related::specification(specification_tag),
                    ],
                }],
            }],
        }
    }

    /// Every line range in the record, across all files and conversations.
    pub fn ranges(&self) -> impl Iterator<Item = &LineRange> {
        self.files
            .iter()
            .flat_map(|f| f.conversations.iter())
            .flat_map(|c| c.ranges.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contributor() -> Contributor {
        Contributor {
            entity_type: "AI".to_string(),
            model_identifier: "openai-api".to_string(),
        }
    }

    #[test]
    fn line_count_follows_newline_segments() {
        assert_eq!(LineRange::whole("").end_line, 1);
        assert_eq!(LineRange::whole("a").end_line, 1);
        assert_eq!(LineRange::whole("a\nb").end_line, 2);
        assert_eq!(LineRange::whole("a\nb\n").end_line, 3);
    }

    #[test]
    fn serialized_shape_matches_ledger_format() {
        let record = TraceRecord::for_write(
            "src/a.ts",
            "x\ny",
            "INT-001",
            "AST_REFACTOR",
            contributor(),
            "SPEC-TAG",
            None,
        );
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["vcs"]["type"], "git");
        assert!(json["vcs"]["revision"].is_null());
        let conv = &json["files"][0]["conversations"][0];
        assert_eq!(json["files"][0]["relative_path"], "src/a.ts");
        assert_eq!(conv["contributor"]["entity_type"], "AI");
        assert_eq!(conv["mutation_class"], "AST_REFACTOR");
        assert_eq!(conv["ranges"][0]["start_line"], 1);
        assert_eq!(conv["ranges"][0]["end_line"], 2);
        assert_eq!(conv["related"][0]["type"], "intent");
        assert_eq!(conv["related"][0]["value"], "INT-001");
        assert_eq!(conv["related"][1]["type"], "specification");
        assert_eq!(conv["related"][1]["value"], "SPEC-TAG");
        assert!(json["record_id"].is_string());
    }

    #[test]
    fn legacy_id_field_is_accepted() {
        let record = TraceRecord::for_write(
            "a",
            "b",
            "INT-1",
            "DOC_UPDATE",
            contributor(),
            "T",
            Some("abc".to_string()),
        );
        let mut json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object_mut().unwrap();
        let id = obj.remove("record_id").unwrap();
        obj.insert("id".to_string(), id);

        let parsed: TraceRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }
}
