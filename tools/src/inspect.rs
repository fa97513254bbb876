//! Schema-less structural walk of an encoded record.

use std::fmt::Write as _;

use bytestream::ByteReader;
use serde::Serialize;
use tracing::debug;
use wire::{DecodeError, Limits, ProtocolReader, StructureReason, TypeTag, WireResult};

/// Strings longer than this are shortened in rendered output.
const PREVIEW_CHARS: usize = 48;

/// Structure of one encoded struct, as read off the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    /// Bytes occupied by the struct, including its stop byte.
    pub byte_len: usize,
    /// Bytes after the struct that were not read.
    pub trailing_bytes: usize,
    pub fields: Vec<FieldNode>,
}

/// One field header and everything it carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldNode {
    pub id: u16,
    #[serde(serialize_with = "serialize_tag")]
    pub tag: TypeTag,
    /// Offset of the field header from the start of the input.
    pub offset: usize,
    /// Header plus payload.
    pub byte_len: usize,
    pub node: Node,
}

/// A payload without schema interpretation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Scalar {
        rendered: String,
    },
    Struct {
        fields: Vec<FieldNode>,
    },
    List {
        #[serde(serialize_with = "serialize_tag")]
        elem: TypeTag,
        items: Vec<Node>,
    },
    Map {
        #[serde(serialize_with = "serialize_tag")]
        key: TypeTag,
        #[serde(serialize_with = "serialize_tag")]
        value: TypeTag,
        entries: Vec<(Node, Node)>,
    },
}

fn serialize_tag<S: serde::Serializer>(tag: &TypeTag, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tag.name())
}

/// Walks one struct from the front of `bytes` without a schema.
pub fn inspect_record(bytes: &[u8], limits: &Limits) -> WireResult<InspectReport> {
    let mut source = ByteReader::new(bytes);
    let mut reader = ProtocolReader::new(&mut source, limits);
    let fields = walk_struct(&mut reader)?;
    let byte_len = reader.position();
    let trailing_bytes = bytes.len() - byte_len;
    if trailing_bytes > 0 {
        debug!(byte_len, trailing_bytes, "input continues past the record");
    }
    Ok(InspectReport {
        byte_len,
        trailing_bytes,
        fields,
    })
}

fn walk_struct(r: &mut ProtocolReader<'_, ByteReader<'_>>) -> WireResult<Vec<FieldNode>> {
    r.enter()?;
    let mut fields = Vec::new();
    loop {
        let offset = r.position();
        let Some(header) = r.read_field_begin()? else {
            break;
        };
        let node = walk_value(r, header.tag)?;
        r.read_field_end();
        fields.push(FieldNode {
            id: header.id,
            tag: header.tag,
            offset,
            byte_len: r.position() - offset,
            node,
        });
    }
    r.leave();
    Ok(fields)
}

fn walk_value(r: &mut ProtocolReader<'_, ByteReader<'_>>, tag: TypeTag) -> WireResult<Node> {
    let rendered = match tag {
        TypeTag::Bool => r.read_bool()?.to_string(),
        TypeTag::Byte => r.read_byte()?.to_string(),
        TypeTag::I16 => r.read_i16()?.to_string(),
        TypeTag::I32 => r.read_i32()?.to_string(),
        TypeTag::I64 => r.read_i64()?.to_string(),
        TypeTag::Double => r.read_double()?.to_string(),
        TypeTag::String => render_bytes(&r.read_binary()?),
        TypeTag::Struct => {
            return Ok(Node::Struct {
                fields: walk_struct(r)?,
            })
        }
        TypeTag::List | TypeTag::Set => {
            let header = r.read_list_begin()?;
            r.enter()?;
            let items = (0..header.len)
                .map(|_| walk_value(r, header.elem))
                .collect::<WireResult<Vec<_>>>()?;
            r.leave();
            return Ok(Node::List {
                elem: header.elem,
                items,
            });
        }
        TypeTag::Map => {
            let header = r.read_map_begin()?;
            r.enter()?;
            let mut entries = Vec::with_capacity(header.len.min(1024));
            for _ in 0..header.len {
                let key = walk_value(r, header.key)?;
                let value = walk_value(r, header.value)?;
                entries.push((key, value));
            }
            r.leave();
            return Ok(Node::Map {
                key: header.key,
                value: header.value,
                entries,
            });
        }
        TypeTag::Stop => {
            return Err(DecodeError::StructureMismatch {
                reason: StructureReason::UnexpectedStop,
            })
        }
    };
    Ok(Node::Scalar { rendered })
}

/// Renders a string payload as quoted text, or as hex when not UTF-8.
fn render_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) if text.chars().count() > PREVIEW_CHARS => {
            let head: String = text.chars().take(PREVIEW_CHARS).collect();
            format!("{head:?}... ({} bytes)", bytes.len())
        }
        Ok(text) => format!("{text:?}"),
        Err(_) => {
            let mut out = String::from("0x");
            for byte in bytes.iter().take(PREVIEW_CHARS) {
                let _ = write!(out, "{byte:02x}");
            }
            if bytes.len() > PREVIEW_CHARS {
                let _ = write!(out, "... ({} bytes)", bytes.len());
            }
            out
        }
    }
}

/// Renders a report as an indented tree.
pub fn format_inspect_report(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "record: {} bytes, {} fields",
        report.byte_len,
        report.fields.len()
    );
    if report.trailing_bytes > 0 {
        let _ = writeln!(out, "trailing: {} bytes", report.trailing_bytes);
    }
    format_fields(&mut out, &report.fields, 1);
    out
}

fn format_fields(out: &mut String, fields: &[FieldNode], depth: usize) {
    for field in fields {
        let _ = write!(
            out,
            "{:indent$}#{} {} @{} ({} bytes)",
            "",
            field.id,
            field.tag,
            field.offset,
            field.byte_len,
            indent = depth * 2
        );
        format_node(out, &field.node, depth);
    }
}

fn format_node(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::Scalar { rendered } => {
            let _ = writeln!(out, " = {rendered}");
        }
        Node::Struct { fields } => {
            let _ = writeln!(out);
            format_fields(out, fields, depth + 1);
        }
        Node::List { elem, items } => {
            let _ = writeln!(out, " [{elem}; {}]", items.len());
            for (index, item) in items.iter().enumerate() {
                let _ = write!(out, "{:indent$}[{index}]", "", indent = (depth + 1) * 2);
                format_node(out, item, depth + 1);
            }
        }
        Node::Map {
            key,
            value,
            entries,
        } => {
            let _ = writeln!(out, " {{{key} => {value}; {}}}", entries.len());
            for (key, value) in entries {
                let _ = write!(out, "{:indent$}key", "", indent = (depth + 1) * 2);
                format_node(out, key, depth + 1);
                let _ = write!(out, "{:indent$}value", "", indent = (depth + 1) * 2);
                format_node(out, value, depth + 1);
            }
        }
    }
}
