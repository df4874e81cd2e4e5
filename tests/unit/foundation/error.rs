use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlitScanError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        SlitScanError::input("x")
            .to_string()
            .contains("input error:")
    );
    assert!(
        SlitScanError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlitScanError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_converts_via_question_mark() {
    fn fails() -> SlitScanResult<()> {
        let inner: anyhow::Result<()> = Err(anyhow::anyhow!("decode failed"));
        inner?;
        Ok(())
    }
    let err = fails().unwrap_err();
    assert!(matches!(err, SlitScanError::Other(_)));
    assert!(err.to_string().contains("decode failed"));
}
