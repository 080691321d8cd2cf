mod js;

pub use js::JsGeometryBackend;
