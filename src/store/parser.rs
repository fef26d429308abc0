//! Text scraping of certutil reports.
//!
//! certutil has no structured output mode and localises its field labels, so
//! both parsers key off layout rather than label text.

use crate::cert::SerialNumber;
use regex::Regex;
use std::sync::LazyLock;

/// One `-store` record: banner line, serial line, then an issuer-style
/// `Label: K=V` line. `.` never crosses a newline.
pub const STORE_RECORD_PATTERN: &str = r"================.*================\n.*: (.*)\n.\w+.*:.*=.*";

static STORE_RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(STORE_RECORD_PATTERN).expect("store record pattern is a valid regex")
});

/// Lines containing this marker belong to the issuer/subject blocks of a
/// `-verify` report.
const SUBJECT_MARKER: &str = "CN";

/// Number of marker lines that must be passed before a serial is accepted.
const SUBJECT_MARKER_THRESHOLD: usize = 2;

/// Extract the certificate serial from `certutil -verify` output.
///
/// Skips past the issuer and subject blocks by counting `CN` lines, then takes
/// the second token of the first two-token line containing a colon.
pub fn parse_verify_serial(output: &str) -> Option<SerialNumber> {
    let mut marker_lines = 0usize;

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains(SUBJECT_MARKER) {
            marker_lines += 1;
            continue;
        }

        if marker_lines > SUBJECT_MARKER_THRESHOLD && line.contains(':') {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if let [_, candidate] = tokens.as_slice() {
                if let Ok(serial) = SerialNumber::parse(candidate) {
                    return Some(serial);
                }
            }
        }
    }

    tracing::debug!("No serial line found after {marker_lines} subject marker lines");
    None
}

/// Extract every serial listed by `certutil -store`, in output order.
///
/// Surrounding whitespace on the serial line is dropped; a record is skipped
/// only when nothing is left or the token has whitespace inside it.
pub fn parse_store_serials(output: &str) -> Vec<SerialNumber> {
    let normalized = output.replace("\r\n", "\n");

    STORE_RECORD
        .captures_iter(&normalized)
        .filter_map(|caps| {
            let raw = caps.get(1).map_or("", |m| m.as_str());
            match SerialNumber::parse(raw.trim()) {
                Ok(serial) => Some(serial),
                Err(e) => {
                    tracing::debug!("Skipping store record with unusable serial '{raw}': {e}");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERIFY_OUTPUT: &str = "\
Issuer:
    CN=Google Internet Authority G2
    O=Google Inc
    C=US
Subject:
    CN=*.google.com
    CN=google.com
    O=Google Inc
    L=Mountain View
    C=US
Serial: 76385ee42745b0cd
NotBefore: 10/05/2001
";

    const STORE_OUTPUT_FR: &str = "\
Root
================ Certificat 0 ================
Numéro de série : 79ad16a14aa0a5ad4c7358f407132e65
Émetteur: CN=Microsoft Root Certificate Authority, DC=microsoft, DC=com
 NotBefore : 10/05/2001 00:19
 NotAfter : 10/05/2021 00:28
Objet: CN=Microsoft Root Certificate Authority, DC=microsoft, DC=com
Hach. cert. (sha1) : cd d4 ee ae 60 00 ac 7f 40 c3 80 2c 17 1e 30 14 80 30 c0 72

================ Certificat 1 ================
Numéro de série : 00
Émetteur: CN=Thawte Timestamping CA, OU=Thawte Certification, O=Thawte, C=ZA
 NotBefore : 01/01/1997 01:00
 NotAfter : 01/01/2021 00:59
Objet: CN=Thawte Timestamping CA, OU=Thawte Certification, O=Thawte, C=ZA
CertUtil: -store command completed successfully.
";

    #[test]
    fn test_verify_serial_after_subject_blocks() {
        let serial = parse_verify_serial(VERIFY_OUTPUT).unwrap();
        assert_eq!(serial.as_str(), "76385ee42745b0cd");
    }

    #[test]
    fn test_verify_serial_requires_three_marker_lines() {
        let output = "\
Issuer:
    CN=Google Internet Authority G2
Subject:
    CN=*.google.com
Serial: 76385ee42745b0cd
";
        assert!(parse_verify_serial(output).is_none());
    }

    #[test]
    fn test_verify_serial_ignores_multi_token_labels() {
        // Labels with spaces split into more than two tokens and are skipped
        let output = "\
CN=a
CN=b
CN=c
Cert Serial Number: 76385ee42745b0cd
Serial: 0a1b
";
        assert_eq!(parse_verify_serial(output).unwrap().as_str(), "0a1b");
    }

    #[test]
    fn test_verify_serial_ignores_colon_lines_before_threshold() {
        let output = "\
NotBefore: 2001
CN=a
CN=b
Version: 3
CN=c
Serial: 1234
";
        assert_eq!(parse_verify_serial(output).unwrap().as_str(), "1234");
    }

    #[test]
    fn test_verify_serial_handles_crlf() {
        let output = VERIFY_OUTPUT.replace('\n', "\r\n");
        assert_eq!(
            parse_verify_serial(&output).unwrap().as_str(),
            "76385ee42745b0cd"
        );
    }

    #[test]
    fn test_verify_serial_empty_output() {
        assert!(parse_verify_serial("").is_none());
    }

    #[test]
    fn test_store_serials_in_order() {
        let serials = parse_store_serials(STORE_OUTPUT_FR);
        let serials: Vec<&str> = serials.iter().map(|s| s.as_str()).collect();
        assert_eq!(serials, vec!["79ad16a14aa0a5ad4c7358f407132e65", "00"]);
    }

    #[test]
    fn test_store_serials_english_crlf() {
        let output = "\
My\r
================ Certificate 0 ================\r
Serial Number: 3300000031e5d5c5d4e33f2c0e000000000031\r
Issuer: CN=Contoso Root, O=Contoso\r
 NotBefore: 1/1/2020 12:00 AM\r
\r
================ Certificate 1 ================\r
Serial Number: 1f2e\r
Issuer: CN=Fabrikam CA\r
================ Certificate 2 ================\r
Serial Number: 77aa\r
Issuer: CN=Woodgrove CA\r
CertUtil: -store command completed successfully.\r
";
        let serials = parse_store_serials(output);
        let serials: Vec<&str> = serials.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            serials,
            vec!["3300000031e5d5c5d4e33f2c0e000000000031", "1f2e", "77aa"]
        );
    }

    #[test]
    fn test_store_serials_empty_store() {
        let output = "Root\nCertUtil: -store command completed successfully.\n";
        assert!(parse_store_serials(output).is_empty());
    }

    #[test]
    fn test_store_serials_requires_issuer_line() {
        // A record whose third line has no '=' does not match
        let output = "\
================ Certificate 0 ================
Serial Number: 1f2e
NotBefore: 1/1/2020
";
        assert!(parse_store_serials(output).is_empty());
    }

    #[test]
    fn test_store_serials_trims_trailing_whitespace() {
        let output = concat!(
            "================ Certificate 0 ================\n",
            "Serial Number: 1f2e \n",
            "Issuer: CN=Fabrikam CA\n",
            "================ Certificate 1 ================\n",
            "Serial Number: 77aa\t\n",
            "Issuer: CN=Woodgrove CA\n",
        );
        let serials = parse_store_serials(output);
        let serials: Vec<&str> = serials.iter().map(|s| s.as_str()).collect();
        assert_eq!(serials, vec!["1f2e", "77aa"]);
    }

    #[test]
    fn test_store_serials_skips_blank_and_split_tokens() {
        let output = concat!(
            "================ Certificate 0 ================\n",
            "Serial Number:  \n",
            "Issuer: CN=Fabrikam CA\n",
            "================ Certificate 1 ================\n",
            "Serial Number: 1f 2e\n",
            "Issuer: CN=Woodgrove CA\n",
            "================ Certificate 2 ================\n",
            "Serial Number: 77aa\n",
            "Issuer: CN=Contoso CA\n",
        );
        let serials = parse_store_serials(output);
        let serials: Vec<&str> = serials.iter().map(|s| s.as_str()).collect();
        assert_eq!(serials, vec!["77aa"]);
    }
}
