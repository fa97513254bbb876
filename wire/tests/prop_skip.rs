use bytestream::{ByteReader, ByteWriter, StreamReader};
use proptest::prelude::*;
use wire::{FieldHeader, Limits, ListHeader, MapHeader, ProtocolReader, ProtocolWriter, TypeTag};

/// A value tree used to generate arbitrary, well-formed payloads.
#[derive(Clone, Debug)]
enum Node {
    Bool(bool),
    I32(i32),
    I64(i64),
    Str(String),
    List(Vec<Node>),
    Struct(Vec<(u16, Node)>),
    Map(Vec<(i16, Node)>),
}

impl Node {
    fn tag(&self) -> TypeTag {
        match self {
            Self::Bool(_) => TypeTag::Bool,
            Self::I32(_) => TypeTag::I32,
            Self::I64(_) => TypeTag::I64,
            Self::Str(_) => TypeTag::String,
            Self::List(_) => TypeTag::List,
            Self::Struct(_) => TypeTag::Struct,
            Self::Map(_) => TypeTag::Map,
        }
    }

    fn write(&self, w: &mut ProtocolWriter<'_>) {
        match self {
            Self::Bool(v) => w.write_bool(*v),
            Self::I32(v) => w.write_i32(*v),
            Self::I64(v) => w.write_i64(*v),
            Self::Str(v) => w.write_string(v).unwrap(),
            Self::List(items) => {
                // Homogeneous lists: everything is written as the first item's type.
                let elem = items.first().map_or(TypeTag::I32, Node::tag);
                let items: Vec<&Node> = items.iter().filter(|n| n.tag() == elem).collect();
                w.write_list_begin(ListHeader {
                    elem,
                    len: items.len(),
                })
                .unwrap();
                for item in items {
                    item.write(w);
                }
                w.write_list_end();
            }
            Self::Struct(fields) => {
                w.write_struct_begin("Node");
                for (id, node) in fields {
                    w.write_field_begin(FieldHeader::new(node.tag(), *id));
                    node.write(w);
                    w.write_field_end();
                }
                w.write_field_stop();
                w.write_struct_end();
            }
            Self::Map(entries) => {
                let value = entries.first().map_or(TypeTag::Bool, |(_, n)| n.tag());
                let entries: Vec<&(i16, Node)> =
                    entries.iter().filter(|(_, n)| n.tag() == value).collect();
                w.write_map_begin(MapHeader {
                    key: TypeTag::I16,
                    value,
                    len: entries.len(),
                })
                .unwrap();
                for (key, node) in entries {
                    w.write_i16(*key);
                    node.write(w);
                }
                w.write_map_end();
            }
        }
    }
}

fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Node::Bool),
        any::<i32>().prop_map(Node::I32),
        any::<i64>().prop_map(Node::I64),
        "[a-z.X]{0,12}".prop_map(Node::Str),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Node::List),
            prop::collection::vec((1u16..40, inner.clone()), 0..6).prop_map(Node::Struct),
            prop::collection::vec((any::<i16>(), inner), 0..6).prop_map(Node::Map),
        ]
    })
}

proptest! {
    #[test]
    fn prop_skip_consumes_exactly_one_value(node in node_strategy(), trailer in any::<i32>()) {
        let mut out = ByteWriter::new();
        let mut writer = ProtocolWriter::new(&mut out);
        node.write(&mut writer);
        writer.write_i32(trailer);
        let bytes = out.finish();

        let limits = Limits::default();
        let mut source = ByteReader::new(&bytes);
        let mut reader = ProtocolReader::new(&mut source, &limits);
        reader.skip(node.tag()).unwrap();
        prop_assert_eq!(reader.depth(), 0);
        prop_assert_eq!(reader.read_i32().unwrap(), trailer);

        let mut stream = StreamReader::new(bytes.as_slice());
        let mut reader = ProtocolReader::new(&mut stream, &limits);
        reader.skip(node.tag()).unwrap();
        prop_assert_eq!(reader.read_i32().unwrap(), trailer);
    }

    #[test]
    fn prop_skip_truncated_fails(node in node_strategy(), cut in any::<prop::sample::Index>()) {
        let mut out = ByteWriter::new();
        let mut writer = ProtocolWriter::new(&mut out);
        node.write(&mut writer);
        let bytes = out.finish();
        prop_assume!(!bytes.is_empty());

        let cut = cut.index(bytes.len());
        let limits = Limits::default();
        let mut source = ByteReader::new(&bytes[..cut]);
        let mut reader = ProtocolReader::new(&mut source, &limits);
        prop_assert!(reader.skip(node.tag()).is_err());
    }
}
