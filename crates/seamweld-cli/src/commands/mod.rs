pub mod stitch;
