use crate::mp4::r#box::parse_box_header;

/// What a meta-box scan found
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MetaSummary {
    pub xml_text: Option<String>,
    pub has_xml: bool,
}

/// Scan the children of a meta payload.
///
/// Children start 4 bytes in (past the version+flags field) and carry plain
/// size+type headers. The scan stops on a zero size, on a child that extends
/// past the payload, or at the payload's end. When `decode_xml` is set the
/// `xml ` child's bytes are decoded (nulls stripped); otherwise only its
/// presence is recorded.
pub fn parse_meta(payload: &[u8], decode_xml: bool) -> MetaSummary {
    let mut summary = MetaSummary::default();
    let mut pos = 4usize;

    while pos < payload.len() {
        let child_start = pos;
        let Some((kind, size)) = parse_box_header(payload, &mut pos) else {
            break;
        };
        if size == 0 {
            break;
        }
        let header_len = pos - child_start;
        let Some(child_end) = child_start.checked_add(size as usize) else {
            break;
        };
        if child_end > payload.len() || size as usize <= header_len {
            break;
        }

        if &kind == b"xml " {
            summary.has_xml = true;
            if decode_xml {
                let raw = &payload[child_start + header_len..child_end];
                summary.xml_text = Some(strip_nulls(raw));
            }
        }

        pos = child_end;
    }

    summary
}

fn strip_nulls(raw: &[u8]) -> String {
    let cleaned: Vec<u8> = raw.iter().copied().filter(|&b| b != 0x00).collect();
    String::from_utf8_lossy(&cleaned).into_owned()
}
