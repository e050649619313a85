//! Sheet protection, `sheetProtection`.
//!
//! Passwords are stored either as the modern salted hash
//! (`algorithmName`/`hashValue`/`saltValue`/`spinCount`) or as the legacy
//! 16-bit `password` verifier that older readers still expect.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xlsx::SheetKind;
use crate::ooxml::xml::{XmlReader, XmlWriter};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use rand::TryRng;
use rand::rngs::SysRng;
use sha2::{Digest, Sha512};
use std::io::{BufRead, Write};

const SHA512_ALGORITHM: &str = "SHA-512";
const DEFAULT_SPIN_COUNT: u32 = 100_000;
const SALT_LEN: usize = 16;

/// Protection settings of a worksheet or chartsheet.
///
/// The permission flags follow the file format: for the `format*`,
/// `insert*`, `delete*`, `sort`, `autoFilter` and `pivotTables` flags a
/// value of `true` means the action is *locked*.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetProtection {
    /// Legacy 16-bit verifier, four hex digits
    pub legacy_password: Option<String>,
    pub algorithm_name: Option<String>,
    /// Base64 hash
    pub hash_value: Option<String>,
    /// Base64 salt
    pub salt_value: Option<String>,
    pub spin_count: Option<u32>,
    /// Worksheets: protection is enforced
    pub sheet: Option<bool>,
    /// Chartsheets: chart contents are protected
    pub content: Option<bool>,
    pub objects: Option<bool>,
    pub scenarios: Option<bool>,
    pub format_cells: Option<bool>,
    pub format_columns: Option<bool>,
    pub format_rows: Option<bool>,
    pub insert_columns: Option<bool>,
    pub insert_rows: Option<bool>,
    pub insert_hyperlinks: Option<bool>,
    pub delete_columns: Option<bool>,
    pub delete_rows: Option<bool>,
    pub select_locked_cells: Option<bool>,
    pub sort: Option<bool>,
    pub auto_filter: Option<bool>,
    pub pivot_tables: Option<bool>,
    pub select_unlocked_cells: Option<bool>,
}

impl SheetProtection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::default()
    }

    /// Whether any password verifier is present.
    pub fn has_password(&self) -> bool {
        self.hash_value.is_some() || self.legacy_password.is_some()
    }

    /// Protect with `password` using a salted SHA-512 hash.
    pub fn set_password(&mut self, password: &str) -> Result<()> {
        let mut salt = [0u8; SALT_LEN];
        let mut rng = SysRng;
        rng.try_fill_bytes(&mut salt).map_err(|e| {
            OoxmlError::Other(format!("failed to generate random salt for sheet password: {e}"))
        })?;

        let hash = sha512_spin(password, &salt, DEFAULT_SPIN_COUNT);
        self.algorithm_name = Some(SHA512_ALGORITHM.to_string());
        self.hash_value = Some(BASE64_ENGINE.encode(hash));
        self.salt_value = Some(BASE64_ENGINE.encode(salt));
        self.spin_count = Some(DEFAULT_SPIN_COUNT);
        self.legacy_password = None;
        Ok(())
    }

    /// Protect with the legacy 16-bit verifier. An empty password clears it.
    pub fn set_legacy_password(&mut self, password: &str) {
        self.legacy_password = legacy_password_hash(password);
    }

    pub fn clear_password(&mut self) {
        self.legacy_password = None;
        self.algorithm_name = None;
        self.hash_value = None;
        self.salt_value = None;
        self.spin_count = None;
    }

    /// Check `password` against the stored verifier. The salted hash wins
    /// when both are present. Without any verifier only the empty password
    /// matches.
    pub fn verify_password(&self, password: &str) -> bool {
        if let Some(expected) = &self.hash_value {
            let algorithm = self.algorithm_name.as_deref().unwrap_or(SHA512_ALGORITHM);
            if !algorithm.eq_ignore_ascii_case(SHA512_ALGORITHM) {
                log::debug!("cannot verify sheet password hashed with {algorithm}");
                return false;
            }
            let salt = match &self.salt_value {
                Some(salt) => match BASE64_ENGINE.decode(salt) {
                    Ok(salt) => salt,
                    Err(err) => {
                        log::warn!("invalid sheet protection salt: {err}");
                        return false;
                    },
                },
                None => Vec::new(),
            };
            let spin_count = self.spin_count.unwrap_or(0);
            return BASE64_ENGINE.encode(sha512_spin(password, &salt, spin_count)) == *expected;
        }
        match &self.legacy_password {
            Some(expected) => legacy_password_hash(password)
                .is_some_and(|hash| hash.eq_ignore_ascii_case(expected)),
            None => password.is_empty(),
        }
    }

    pub fn read<R: BufRead>(reader: &XmlReader<R>) -> Self {
        Self {
            legacy_password: reader.attribute("password").map(str::to_owned),
            algorithm_name: reader.attribute("algorithmName").map(str::to_owned),
            hash_value: reader.attribute("hashValue").map(str::to_owned),
            salt_value: reader.attribute("saltValue").map(str::to_owned),
            spin_count: reader.parse_attribute("spinCount"),
            sheet: reader.parse_attribute("sheet"),
            content: reader.parse_attribute("content"),
            objects: reader.parse_attribute("objects"),
            scenarios: reader.parse_attribute("scenarios"),
            format_cells: reader.parse_attribute("formatCells"),
            format_columns: reader.parse_attribute("formatColumns"),
            format_rows: reader.parse_attribute("formatRows"),
            insert_columns: reader.parse_attribute("insertColumns"),
            insert_rows: reader.parse_attribute("insertRows"),
            insert_hyperlinks: reader.parse_attribute("insertHyperlinks"),
            delete_columns: reader.parse_attribute("deleteColumns"),
            delete_rows: reader.parse_attribute("deleteRows"),
            select_locked_cells: reader.parse_attribute("selectLockedCells"),
            sort: reader.parse_attribute("sort"),
            auto_filter: reader.parse_attribute("autoFilter"),
            pivot_tables: reader.parse_attribute("pivotTables"),
            select_unlocked_cells: reader.parse_attribute("selectUnlockedCells"),
        }
    }

    /// Write `sheetProtection`; chartsheets only know `content` and `objects`.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>, kind: SheetKind) -> Result<()> {
        writer.start_element("sheetProtection")?;
        writer.optional_attribute("password", self.legacy_password.as_ref())?;
        writer.optional_attribute("algorithmName", self.algorithm_name.as_ref())?;
        writer.optional_attribute("hashValue", self.hash_value.as_ref())?;
        writer.optional_attribute("saltValue", self.salt_value.as_ref())?;
        writer.optional_attribute("spinCount", self.spin_count.as_ref())?;
        match kind {
            SheetKind::Chartsheet => {
                writer.optional_attribute("content", self.content.as_ref())?;
                writer.optional_attribute("objects", self.objects.as_ref())?;
            },
            SheetKind::Worksheet => {
                let flags = [
                    ("sheet", self.sheet),
                    ("objects", self.objects),
                    ("scenarios", self.scenarios),
                    ("formatCells", self.format_cells),
                    ("formatColumns", self.format_columns),
                    ("formatRows", self.format_rows),
                    ("insertColumns", self.insert_columns),
                    ("insertRows", self.insert_rows),
                    ("insertHyperlinks", self.insert_hyperlinks),
                    ("deleteColumns", self.delete_columns),
                    ("deleteRows", self.delete_rows),
                    ("selectLockedCells", self.select_locked_cells),
                    ("sort", self.sort),
                    ("autoFilter", self.auto_filter),
                    ("pivotTables", self.pivot_tables),
                    ("selectUnlockedCells", self.select_unlocked_cells),
                ];
                for (name, value) in flags {
                    writer.optional_attribute(name, value.as_ref())?;
                }
            },
        }
        writer.end_element()
    }
}

/// H0 = SHA-512(salt || UTF-16LE password), Hn = SHA-512(Hn-1 || n as u32 LE).
fn sha512_spin(password: &str, salt: &[u8], spin_count: u32) -> Vec<u8> {
    let mut pw_bytes = Vec::with_capacity(password.len() * 2);
    for ch in password.encode_utf16() {
        pw_bytes.extend_from_slice(&ch.to_le_bytes());
    }

    let mut hasher = Sha512::new();
    hasher.update(salt);
    hasher.update(&pw_bytes);
    let mut hash = hasher.finalize().to_vec();

    for i in 0..spin_count {
        let mut hasher = Sha512::new();
        hasher.update(&hash);
        hasher.update(i.to_le_bytes());
        hash = hasher.finalize().to_vec();
    }
    hash
}

/// Legacy 16-bit password verifier as four upper-case hex digits.
fn legacy_password_hash(password: &str) -> Option<String> {
    if password.is_empty() {
        return None;
    }
    let units: Vec<u16> = password.encode_utf16().collect();
    let mut hash: u16 = 0;
    for &ch in units.iter().rev() {
        hash = ((hash >> 14) & 0x01) | ((hash << 1) & 0x7FFF);
        hash ^= ch;
    }
    hash = ((hash >> 14) & 0x01) | ((hash << 1) & 0x7FFF);
    hash ^= units.len() as u16;
    hash ^= 0xCE4B;
    Some(format!("{hash:04X}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::options::{ReadOptions, WriteOptions};
    use pretty_assertions::assert_eq;

    #[test]
    fn legacy_hash_matches_known_values() {
        assert_eq!(legacy_password_hash("password").as_deref(), Some("83AF"));
        assert_eq!(legacy_password_hash("test").as_deref(), Some("CBEB"));
        assert_eq!(legacy_password_hash("abc").as_deref(), Some("CC1A"));
        assert_eq!(legacy_password_hash(""), None);
    }

    #[test]
    fn salted_password_verifies() {
        let mut protection = SheetProtection::new();
        protection.sheet = Some(true);
        protection.set_password("s3cret").unwrap();
        assert_eq!(protection.algorithm_name.as_deref(), Some("SHA-512"));
        assert_eq!(protection.spin_count, Some(100_000));
        assert_eq!(
            BASE64_ENGINE.decode(protection.salt_value.as_ref().unwrap()).unwrap().len(),
            16
        );
        assert!(protection.verify_password("s3cret"));
        assert!(!protection.verify_password("secret"));

        protection.clear_password();
        assert!(!protection.has_password());
        assert!(protection.verify_password(""));
    }

    #[test]
    fn legacy_password_verifies() {
        let mut protection = SheetProtection::new();
        protection.set_legacy_password("password");
        assert!(protection.verify_password("password"));
        assert!(!protection.verify_password("Password"));
    }

    #[test]
    fn known_salted_hash() {
        // spin count 0 reduces to a single SHA-512 over salt and password
        let protection = SheetProtection {
            algorithm_name: Some("SHA-512".into()),
            hash_value: Some(BASE64_ENGINE.encode(Sha512::digest([b'a', 0]))),
            salt_value: Some(String::new()),
            spin_count: Some(0),
            ..Default::default()
        };
        assert!(protection.verify_password("a"));
    }

    #[test]
    fn chartsheet_protection_writes_chart_attributes_only() {
        let protection = SheetProtection {
            legacy_password: Some("83AF".into()),
            sheet: Some(true),
            content: Some(true),
            objects: Some(true),
            format_cells: Some(false),
            ..Default::default()
        };
        let mut writer = XmlWriter::in_memory(WriteOptions::new().with_xml_declaration(false));
        protection.write(&mut writer, SheetKind::Chartsheet).unwrap();
        let xml = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(xml, r#"<sheetProtection password="83AF" content="1" objects="1"/>"#);

        let mut writer = XmlWriter::in_memory(WriteOptions::new().with_xml_declaration(false));
        protection.write(&mut writer, SheetKind::Worksheet).unwrap();
        let xml = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(
            xml,
            r#"<sheetProtection password="83AF" sheet="1" objects="1" formatCells="0"/>"#
        );
        let mut reader = XmlReader::from_str(&xml, ReadOptions::new());
        reader.next_root().unwrap();
        let back = SheetProtection::read(&reader);
        assert_eq!(back.format_cells, Some(false));
        assert!(back.verify_password("password"));
    }
}
