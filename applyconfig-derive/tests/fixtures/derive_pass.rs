pub mod applyconfigurations {
    pub mod meta {
        pub mod v1 {
            #[derive(Default)]
            pub struct TypeMetaApplyConfiguration {
                pub kind: Option<String>,
            }

            #[derive(Default)]
            pub struct ObjectMetaApplyConfiguration {
                pub name: Option<String>,
            }

            pub trait ObjectApplyConfiguration {
                fn type_meta(&self) -> &TypeMetaApplyConfiguration;
                fn type_meta_mut(&mut self) -> &mut TypeMetaApplyConfiguration;
                fn object_meta(&self) -> Option<&ObjectMetaApplyConfiguration>;
                fn object_meta_mut(&mut self) -> &mut Option<ObjectMetaApplyConfiguration>;
            }
        }
    }
}

use applyconfigurations::meta::v1::{
    ObjectApplyConfiguration, ObjectMetaApplyConfiguration, TypeMetaApplyConfiguration,
};

#[derive(Default, applyconfig_derive::ApplyConfiguration)]
pub struct WidgetApplyConfiguration {
    pub type_meta: TypeMetaApplyConfiguration,
    pub object_meta: Option<ObjectMetaApplyConfiguration>,
    pub color: Option<String>,
}

fn main() {
    let mut widget = WidgetApplyConfiguration::default();
    assert!(widget.object_meta().is_none());
    widget.type_meta_mut().kind = Some("Widget".into());
    *widget.object_meta_mut() = Some(ObjectMetaApplyConfiguration {
        name: Some("w".into()),
    });
    assert_eq!(widget.type_meta().kind.as_deref(), Some("Widget"));
    assert_eq!(
        widget.object_meta().and_then(|m| m.name.as_deref()),
        Some("w")
    );
    assert!(widget.color.is_none());
}
