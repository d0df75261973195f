pub mod advice;
pub mod crop_stages;
pub mod lifecycle;
pub mod open_meteo;
pub mod yield_model;
