use serde::Serialize;

/// Container format classified from the ftyp major brand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ContainerFormat {
    MP4,
    M4V,
    ThreeGP,
    ThreeG2,
    MOV,
    Unknown(String),
}

impl ContainerFormat {
    pub fn name(&self) -> &str {
        match self {
            ContainerFormat::MP4 => "MP4",
            ContainerFormat::M4V => "M4V",
            ContainerFormat::ThreeGP => "3GP",
            ContainerFormat::ThreeG2 => "3G2",
            ContainerFormat::MOV => "MOV",
            ContainerFormat::Unknown(s) => s,
        }
    }
}

/// Extract the major brand from a ftyp payload.
///
/// The first 4 payload bytes are the brand tag; anything shorter is not a
/// usable ftyp box.
pub fn parse_major_brand(payload: &[u8]) -> Option<String> {
    if payload.len() < 4 {
        return None;
    }
    Some(String::from_utf8_lossy(&payload[..4]).into_owned())
}

/// Classify a major brand into a container format
pub fn classify_brand(major_brand: &str) -> ContainerFormat {
    match major_brand {
        "isom" | "mp41" | "mp42" | "iso2" | "iso4" | "iso5" | "iso6" => ContainerFormat::MP4,
        "M4V " | "M4VH" | "M4VP" => ContainerFormat::M4V,
        "3gp4" | "3gp5" | "3gp6" | "3gp7" | "3ge6" | "3ge7" | "3gg6" => ContainerFormat::ThreeGP,
        "3g2a" | "3g2b" | "3g2c" => ContainerFormat::ThreeG2,
        "qt  " => ContainerFormat::MOV,
        _ => ContainerFormat::Unknown(major_brand.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_major_brand() {
        let payload = [
            b'i', b's', b'o', b'm', // major brand
            0x00, 0x00, 0x02, 0x00, // minor version
            b'i', b's', b'o', b'm', b'm', b'p', b'4', b'1', // compatible brands
        ];
        assert_eq!(parse_major_brand(&payload), Some("isom".to_string()));
        assert_eq!(parse_major_brand(&payload[..3]), None);
    }

    #[test]
    fn test_classify_brand() {
        assert_eq!(classify_brand("isom"), ContainerFormat::MP4);
        assert_eq!(classify_brand("qt  "), ContainerFormat::MOV);
        assert_eq!(classify_brand("3gp5"), ContainerFormat::ThreeGP);
        assert_eq!(
            classify_brand("abcd"),
            ContainerFormat::Unknown("abcd".to_string())
        );
    }
}
