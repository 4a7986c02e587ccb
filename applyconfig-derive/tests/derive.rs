#[test]
fn derive_apply_configuration() {
    let t = trybuild::TestCases::new();
    t.pass("tests/fixtures/derive_pass.rs");
    t.compile_fail("tests/fixtures/derive_fail.rs");
}
