use serde::{Deserialize, Serialize};

/// Sentinel value for fields that could not be recovered from a page
pub const NA: &str = "N/A";

/// One harvested faculty entry
///
/// The serde renames pin the persisted JSON keys to the cache-file format
/// the directory sites have always been harvested into, so existing
/// snapshot files remain loadable. `profile_url` is the record's identity:
/// it is unique within an institution's corpus and serves as the merge key
/// when fresh crawl results are folded into a cached snapshot.
///
/// `raw_html` holds the full page body. It is persisted (the keyword scorer
/// reads it) but must never leave the query engine; the public shape is
/// [`ProfileSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(rename = "Institution")]
    pub institution: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Department")]
    pub department: String,

    #[serde(rename = "Vidwan-ID")]
    pub vidwan_id: String,

    #[serde(rename = "Profile URL")]
    pub profile_url: String,

    #[serde(rename = "Image URL")]
    pub image_url: String,

    #[serde(rename = "Expertise")]
    pub expertise: String,

    #[serde(rename = "html_content", default)]
    pub raw_html: String,
}

/// The public form of a record: everything except the raw page body
///
/// Query results are made of these, so the raw body is absent structurally
/// rather than blanked - there is no field for it to leak through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    #[serde(rename = "Institution")]
    pub institution: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Department")]
    pub department: String,

    #[serde(rename = "Vidwan-ID")]
    pub vidwan_id: String,

    #[serde(rename = "Profile URL")]
    pub profile_url: String,

    #[serde(rename = "Image URL")]
    pub image_url: String,

    #[serde(rename = "Expertise")]
    pub expertise: String,
}

impl From<&ProfileRecord> for ProfileSummary {
    fn from(record: &ProfileRecord) -> Self {
        Self {
            institution: record.institution.clone(),
            name: record.name.clone(),
            department: record.department.clone(),
            vidwan_id: record.vidwan_id.clone(),
            profile_url: record.profile_url.clone(),
            image_url: record.image_url.clone(),
            expertise: record.expertise.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ProfileRecord {
        ProfileRecord {
            institution: "IITM".to_string(),
            name: "Ada Lovelace".to_string(),
            department: "Department of Computer Science".to_string(),
            vidwan_id: "4821".to_string(),
            profile_url: "https://iitm.irins.org/profile/4821".to_string(),
            image_url: "https://iitm.irins.org/images/ada.jpg".to_string(),
            expertise: "Computing, Mathematics".to_string(),
            raw_html: "<html>...</html>".to_string(),
        }
    }

    #[test]
    fn test_record_serializes_with_legacy_keys() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        assert!(json.contains("\"Institution\""));
        assert!(json.contains("\"Vidwan-ID\""));
        assert!(json.contains("\"Profile URL\""));
        assert!(json.contains("\"Image URL\""));
        assert!(json.contains("\"html_content\""));
    }

    #[test]
    fn test_record_round_trips() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let loaded: ProfileRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_record_loads_without_body() {
        // A snapshot written by a stripping exporter still loads
        let json = r#"{
            "Institution": "IITM",
            "Name": "Ada Lovelace",
            "Department": "N/A",
            "Vidwan-ID": "N/A",
            "Profile URL": "https://iitm.irins.org/profile/1",
            "Image URL": "N/A",
            "Expertise": "N/A"
        }"#;
        let loaded: ProfileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(loaded.raw_html, "");
    }

    #[test]
    fn test_summary_has_no_body_key() {
        let summary = ProfileSummary::from(&sample_record());
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("html_content"));
        assert!(json.contains("\"Name\":\"Ada Lovelace\""));
    }
}
