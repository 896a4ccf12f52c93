use std::borrow::Cow;

use quick_xml::escape::unescape;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::error::ConvertError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Source,
    Target,
}

impl NodeKind {
    /// Matches the qualified name as written, so `x:source` is not a source node.
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"source" => Some(NodeKind::Source),
            b"target" => Some(NodeKind::Target),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationNode {
    /// Decoded value of the first child, if that child is text.
    pub first_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationNodeSet {
    pub source_nodes: Vec<TranslationNode>,
    pub target_nodes: Vec<TranslationNode>,
}

impl TranslationNodeSet {
    fn nodes_mut(&mut self, kind: NodeKind) -> &mut Vec<TranslationNode> {
        match kind {
            NodeKind::Source => &mut self.source_nodes,
            NodeKind::Target => &mut self.target_nodes,
        }
    }
}

/// XML end-of-line handling: `\r\n` and lone `\r` become `\n`.
fn normalize_line_endings(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

fn xml_error(reader: &Reader<&[u8]>, source: quick_xml::Error) -> ConvertError {
    ConvertError::Xml {
        position: reader.buffer_position(),
        source,
    }
}

/// Collects every `<source>` and `<target>` element in document order, at any depth.
pub fn parse_translation_nodes(xml: &[u8]) -> Result<TranslationNodeSet, ConvertError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);
    reader.check_end_names(true);

    let mut set = TranslationNodeSet::default();
    let mut buf = Vec::new();
    // The most recently opened match, until its first child is seen.
    let mut pending: Option<NodeKind> = None;
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(source) => return Err(xml_error(&reader, source)),
        };

        if let Some(kind) = pending.take() {
            if let Event::Text(text) = &event {
                // Line endings are normalized before references are expanded, so `&#13;` survives.
                let raw = std::str::from_utf8(text).map_err(|e| xml_error(&reader, e.into()))?;
                let value = unescape(&normalize_line_endings(raw))
                    .map_err(|e| xml_error(&reader, e.into()))?
                    .into_owned();
                if let Some(node) = set.nodes_mut(kind).last_mut() {
                    if !value.is_empty() {
                        node.first_text = Some(value);
                    }
                }
            }
        }

        match &event {
            Event::Start(e) => {
                depth += 1;
                seen_root = true;
                if let Some(kind) = NodeKind::from_name(e.name().as_ref()) {
                    set.nodes_mut(kind).push(TranslationNode::default());
                    pending = Some(kind);
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Empty(e) => {
                seen_root = true;
                if let Some(kind) = NodeKind::from_name(e.name().as_ref()) {
                    set.nodes_mut(kind).push(TranslationNode::default());
                }
            }
            Event::Eof => {
                if depth > 0 {
                    let source = quick_xml::Error::UnexpectedEof(format!(
                        "document with {} unclosed element(s)",
                        depth
                    ));
                    return Err(xml_error(&reader, source));
                }
                if !seen_root {
                    let source = quick_xml::Error::UnexpectedEof("root element".to_string());
                    return Err(xml_error(&reader, source));
                }
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    debug!(
        "Found {} source and {} target nodes",
        set.source_nodes.len(),
        set.target_nodes.len()
    );
    Ok(set)
}
