use crate::importer::ImportReport;

/// Render a short human-readable summary of an import.
pub fn render(report: &ImportReport) -> String {
    let mut output = String::new();
    let meta = &report.metadata;

    let version = match &meta.version_name {
        Some(name) => format!("{} ({})", meta.identity.version_code, name),
        None => meta.identity.version_code.clone(),
    };
    output.push_str(&format!("\n  Imported {} {}\n\n", meta.identity.name, version));

    if meta.is_split {
        output.push_str(&format!(
            "    split:   {}\n",
            meta.split_name.as_deref().unwrap_or("-")
        ));
    }
    output.push_str(&format!("    stored:  {}\n", report.stored_path.display()));
    output.push_str(&format!("    channel: {}\n", report.channel));
    output.push_str(&format!("    source:  {}\n", report.source));
    output.push_str(&format!("    signer:  {}\n", report.fingerprint));

    if report.signer_changed {
        let previous: Vec<&str> = report
            .previous_signatures
            .iter()
            .map(|s| s.as_str())
            .collect();
        output.push_str(&format!(
            "\n  WARNING: signing certificate changed (previously {})\n",
            previous.join(", ")
        ));
    }

    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::model::{Artifact, PackageIdentity, PackageMetadata, SigningFingerprint};

    const DIGEST_A: &str = "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456123";
    const DIGEST_B: &str = "fedcba9876543210fedcba9876543210fedcba9876543210fedcba9876543210";

    fn report(signer_changed: bool) -> ImportReport {
        ImportReport {
            metadata: PackageMetadata {
                identity: PackageIdentity::new("com.example.app", "12").unwrap(),
                is_split: false,
                version_name: Some("1.2".into()),
                split_name: None,
            },
            artifact: Artifact::new("/dl/app.apk", false),
            stored_path: PathBuf::from("apps/packages/com.example.app/12/base.apk"),
            source: "store".into(),
            channel: "stable".into(),
            fingerprint: SigningFingerprint::parse(DIGEST_A).unwrap(),
            previous_signatures: vec![SigningFingerprint::parse(DIGEST_B).unwrap()],
            signer_changed,
            imported_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn summary_lists_paths_and_labels() {
        let out = render(&report(false));
        assert!(out.contains("Imported com.example.app 12 (1.2)"));
        assert!(out.contains("apps/packages/com.example.app/12/base.apk"));
        assert!(out.contains("channel: stable"));
        assert!(out.contains(DIGEST_A));
        assert!(!out.contains("WARNING"));
    }

    #[test]
    fn signer_change_is_flagged() {
        let out = render(&report(true));
        assert!(out.contains("WARNING: signing certificate changed"));
        assert!(out.contains(DIGEST_B));
    }
}
