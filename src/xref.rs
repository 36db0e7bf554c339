//! Cross-reference ID codec
//!
//! Converts between ontology URIs and the compact `DB:ID` identifiers used
//! by the bridging source. URIs from namespaces the bridge does not know are
//! filtered out (`None`) rather than treated as errors.
//!
//! ```
//! use trait_mapping::xref::XrefCodec;
//!
//! let codec = XrefCodec::standard();
//! assert_eq!(
//!     codec.uri_to_xref_id("http://www.orpha.net/ORDO/Orphanet_976"),
//!     Some("Orphanet:976".to_string())
//! );
//! assert_eq!(
//!     codec.xref_id_to_uri("HP:0001892", "HP"),
//!     Some("http://purl.obolibrary.org/obo/HP_0001892".to_string())
//! );
//! ```

/// How a database's local identifiers are normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdForm {
    /// Only the digits are significant (`Orphanet_976` -> `976`)
    Numeric,
    /// A letter prefix is part of the identifier (`D003924`)
    Prefixed,
}

/// One database the bridging source understands
#[derive(Debug, Clone, Copy)]
pub struct XrefDatabase {
    /// Name used in `DB:ID` form
    pub name: &'static str,
    /// Lowercase namespace segments that identify this database in URIs
    pub namespace_keys: &'static [&'static str],
    /// URI template; `{}` is replaced by the local identifier
    pub uri_template: &'static str,
    pub id_form: IdForm,
}

const STANDARD_DATABASES: &[XrefDatabase] = &[
    XrefDatabase {
        name: "Orphanet",
        namespace_keys: &["ordo", "orphanet"],
        uri_template: "http://www.orpha.net/ORDO/Orphanet_{}",
        id_form: IdForm::Numeric,
    },
    XrefDatabase {
        name: "EFO",
        namespace_keys: &["efo"],
        uri_template: "http://www.ebi.ac.uk/efo/EFO_{}",
        id_form: IdForm::Numeric,
    },
    XrefDatabase {
        name: "HP",
        namespace_keys: &["hp"],
        uri_template: "http://purl.obolibrary.org/obo/HP_{}",
        id_form: IdForm::Numeric,
    },
    XrefDatabase {
        name: "MONDO",
        namespace_keys: &["mondo"],
        uri_template: "http://purl.obolibrary.org/obo/MONDO_{}",
        id_form: IdForm::Numeric,
    },
    XrefDatabase {
        name: "DOID",
        namespace_keys: &["doid"],
        uri_template: "http://purl.obolibrary.org/obo/DOID_{}",
        id_form: IdForm::Numeric,
    },
    XrefDatabase {
        name: "OMIM",
        namespace_keys: &["omim", "mim"],
        uri_template: "http://identifiers.org/omim/{}",
        id_form: IdForm::Numeric,
    },
    XrefDatabase {
        name: "MeSH",
        namespace_keys: &["mesh"],
        uri_template: "http://identifiers.org/mesh/{}",
        id_form: IdForm::Prefixed,
    },
];

/// The HP local ID may arrive as `HP:0001892`; the 3-character prefix is dropped
const HP_PREFIX_LEN: usize = 3;

/// Bidirectional URI <-> `DB:ID` conversion over a fixed database table
///
/// Built once per run and handed to the resolver and bridge client.
#[derive(Debug, Clone)]
pub struct XrefCodec {
    databases: &'static [XrefDatabase],
}

impl Default for XrefCodec {
    fn default() -> Self {
        Self::standard()
    }
}

impl XrefCodec {
    pub fn standard() -> Self {
        Self {
            databases: STANDARD_DATABASES,
        }
    }

    pub fn databases(&self) -> &[XrefDatabase] {
        self.databases
    }

    fn by_namespace(&self, key: &str) -> Option<&XrefDatabase> {
        let key = key.to_ascii_lowercase();
        self.databases
            .iter()
            .find(|db| db.namespace_keys.contains(&key.as_str()))
    }

    fn by_name(&self, name: &str) -> Option<&XrefDatabase> {
        self.databases
            .iter()
            .find(|db| db.name.eq_ignore_ascii_case(name))
    }

    /// Convert an ontology URI into bridge `DB:ID` form
    ///
    /// Uses the last two path segments. The last carries the identifier and,
    /// when it has one, a namespace prefix naming the database; otherwise the
    /// penultimate segment names it.
    pub fn uri_to_xref_id(&self, uri: &str) -> Option<String> {
        let trimmed = uri.trim().trim_end_matches('/');
        let mut segments = trimmed.rsplit('/');
        let last = segments.next()?;
        let penultimate = segments.next()?;

        // A local-name prefix (`Orphanet_976`, OBO `HP_0001892`) outranks the
        // path; an unknown prefix names a term outside every supported database.
        let db = match last.split_once('_') {
            Some((prefix, _)) => self.by_namespace(prefix)?,
            None => self.by_namespace(penultimate)?,
        };

        let local_id = match db.id_form {
            IdForm::Numeric => last.chars().filter(char::is_ascii_digit).collect::<String>(),
            IdForm::Prefixed => last
                .rsplit_once('_')
                .map(|(_, id)| id)
                .unwrap_or(last)
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect(),
        };
        if local_id.is_empty() {
            return None;
        }

        Some(format!("{}:{}", db.name, local_id))
    }

    /// Convert a local identifier in database `db` back into an ontology URI
    pub fn xref_id_to_uri(&self, id: &str, db: &str) -> Option<String> {
        let database = self.by_name(db)?;
        let id = id.trim();

        let local_id = match id.get(..HP_PREFIX_LEN) {
            Some("HP:" | "HP_" | "hp:" | "hp_") if database.name == "HP" => &id[HP_PREFIX_LEN..],
            _ => id,
        };
        if local_id.is_empty() {
            return None;
        }

        Some(database.uri_template.replace("{}", local_id))
    }

    /// Convert a full `DB:ID` curie into a URI
    pub fn curie_to_uri(&self, curie: &str) -> Option<String> {
        let (db, id) = curie.split_once(':')?;
        self.xref_id_to_uri(id, db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_to_xref_id() {
        let codec = XrefCodec::standard();
        let cases = [
            ("http://www.orpha.net/ORDO/Orphanet_976", "Orphanet:976"),
            ("http://identifiers.org/orphanet/88991/", "Orphanet:88991"),
            ("http://www.ebi.ac.uk/efo/EFO_0000400", "EFO:0000400"),
            ("http://purl.obolibrary.org/obo/HP_0001892", "HP:0001892"),
            ("http://purl.obolibrary.org/obo/MONDO_0007254", "MONDO:0007254"),
            ("http://purl.obolibrary.org/obo/DOID_9352", "DOID:9352"),
            ("http://identifiers.org/omim/102600", "OMIM:102600"),
            ("http://identifiers.org/mesh/D002295", "MeSH:D002295"),
        ];
        for (uri, expected) in cases {
            assert_eq!(codec.uri_to_xref_id(uri).as_deref(), Some(expected), "{}", uri);
        }
    }

    #[test]
    fn test_unsupported_namespaces_are_dropped() {
        let codec = XrefCodec::standard();
        assert_eq!(codec.uri_to_xref_id("http://purl.obolibrary.org/obo/GO_0008150"), None);
        assert_eq!(codec.uri_to_xref_id("http://identifiers.org/medgen/C0002395"), None);
        assert_eq!(codec.uri_to_xref_id("EFO_0000400"), None);
        assert_eq!(codec.uri_to_xref_id("http://www.ebi.ac.uk/efo/EFO_"), None);
        assert_eq!(codec.xref_id_to_uri("123", "UMLS"), None);
    }

    #[test]
    fn test_local_name_prefix_outranks_path() {
        let codec = XrefCodec::standard();
        assert_eq!(
            codec.uri_to_xref_id("http://www.ebi.ac.uk/efo/Orphanet_976").as_deref(),
            Some("Orphanet:976")
        );
        assert_eq!(
            codec.uri_to_xref_id("http://www.ebi.ac.uk/efo/MONDO_0007254").as_deref(),
            Some("MONDO:0007254")
        );
        assert_eq!(codec.uri_to_xref_id("http://www.ebi.ac.uk/efo/GO_0008150"), None);
        assert_eq!(codec.uri_to_xref_id("http://www.orpha.net/ORDO/NCIT_C2852"), None);
    }

    #[test]
    fn test_hp_prefix_is_stripped() {
        let codec = XrefCodec::standard();
        assert_eq!(
            codec.xref_id_to_uri("HP:0001892", "HP").as_deref(),
            Some("http://purl.obolibrary.org/obo/HP_0001892")
        );
        assert_eq!(
            codec.xref_id_to_uri("0001892", "hp").as_deref(),
            Some("http://purl.obolibrary.org/obo/HP_0001892")
        );
    }

    #[test]
    fn test_bare_hp_prefix_has_no_uri() {
        let codec = XrefCodec::standard();
        assert_eq!(codec.xref_id_to_uri("HP:", "HP"), None);
        assert_eq!(codec.xref_id_to_uri("hp_", "HP"), None);
        assert_eq!(codec.curie_to_uri("HP:HP:"), None);
    }

    #[test]
    fn test_curie_to_uri() {
        let codec = XrefCodec::standard();
        assert_eq!(
            codec.curie_to_uri("Orphanet:976").as_deref(),
            Some("http://www.orpha.net/ORDO/Orphanet_976")
        );
        assert_eq!(codec.curie_to_uri("no-colon"), None);
    }

    #[test]
    fn test_round_trip_sample_uris() {
        let codec = XrefCodec::standard();
        for uri in [
            "http://www.orpha.net/ORDO/Orphanet_976",
            "http://www.ebi.ac.uk/efo/EFO_0000400",
            "http://purl.obolibrary.org/obo/HP_0001892",
            "http://purl.obolibrary.org/obo/MONDO_0007254",
            "http://purl.obolibrary.org/obo/DOID_9352",
            "http://identifiers.org/omim/102600",
            "http://identifiers.org/mesh/D002295",
        ] {
            let xref = codec.uri_to_xref_id(uri).unwrap();
            let (db, id) = xref.split_once(':').unwrap();
            assert_eq!(codec.xref_id_to_uri(id, db).as_deref(), Some(uri));
        }
    }

    #[test]
    fn test_round_trip_hp_full_curie() {
        let codec = XrefCodec::standard();
        let uri = codec.xref_id_to_uri("HP:0001892", "HP").unwrap();
        assert_eq!(codec.uri_to_xref_id(&uri).as_deref(), Some("HP:0001892"));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn numeric_databases_round_trip(index in 0usize..6, id in "[0-9]{1,9}") {
                let codec = XrefCodec::standard();
                let db = codec
                    .databases()
                    .iter()
                    .filter(|db| db.id_form == IdForm::Numeric)
                    .nth(index)
                    .unwrap();

                let uri = codec.xref_id_to_uri(&id, db.name).unwrap();
                let xref = codec.uri_to_xref_id(&uri).unwrap();
                prop_assert_eq!(&xref, &format!("{}:{}", db.name, id));

                let (back_db, back_id) = xref.split_once(':').unwrap();
                prop_assert_eq!(codec.xref_id_to_uri(back_id, back_db), Some(uri));
            }

            #[test]
            fn mesh_round_trips(id in "[CD][0-9]{6,9}") {
                let codec = XrefCodec::standard();
                let uri = codec.xref_id_to_uri(&id, "MeSH").unwrap();
                prop_assert_eq!(codec.uri_to_xref_id(&uri), Some(format!("MeSH:{}", id)));
            }
        }
    }
}
