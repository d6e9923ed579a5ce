// Asset references
//
// The core never loads assets itself. Characters and skills only carry typed
// handles that the scene host resolves when it instantiates something.

mod handle;

pub use handle::{
    AssetHandle, AssetId, EffectAsset, EffectHandle, IconAsset, IconHandle, TemplateAsset,
    TemplateHandle,
};
