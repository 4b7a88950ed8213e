pub mod color;
pub mod composite;
pub mod crop_box;
pub mod crop_focus;
pub mod flood;
pub mod mask;
pub mod options;
pub mod shapes;
pub mod smart_crop;
pub mod smudge;
