pub mod consts;
pub mod cut;
pub mod error;
pub mod field;
pub mod io;
pub mod pipeline;
pub mod raster;
pub mod seam;
