#[allow(dead_code)]
#[derive(applyconfig_derive::ApplyConfiguration)]
pub struct MissingMetaConfiguration {
    pub type_meta: Option<String>,
    pub color: Option<String>,
}

fn main() {}
