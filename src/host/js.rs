use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::backend::GeometryBackend;
use crate::error::BackendError;
use crate::math::Vec3;

const CREATE_CIRCLE: &str = "createCircle";
const EXTRUDE: &str = "extrude";
const DELETE: &str = "delete";

/// Geometry backend that forwards to a JavaScript host object.
///
/// The host provides
/// `createCircle(center, normal, radius)`, `extrude(curve, direction, length)`
/// and `delete(curve)`. Vectors are passed as `[x, y, z]` arrays and curve
/// handles are whatever `createCircle` returns.
pub struct JsGeometryBackend {
    host: JsValue,
}

impl JsGeometryBackend {
    pub fn new(host: JsValue) -> Self {
        Self { host }
    }

    fn method(&self, name: &'static str) -> Result<Function, BackendError> {
        Reflect::get(&self.host, &JsValue::from_str(name))
            .map_err(|e| BackendError::new(name, describe(&e)))?
            .dyn_into::<Function>()
            .map_err(|_| BackendError::new(name, "host does not provide this method"))
    }
}

fn vec_to_js(v: Vec3) -> JsValue {
    Array::of3(&v.x.into(), &v.y.into(), &v.z.into()).into()
}

fn describe(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    match err.dyn_ref::<js_sys::Error>() {
        Some(e) => String::from(e.message()),
        None => format!("{:?}", err),
    }
}

impl GeometryBackend for JsGeometryBackend {
    type Curve = JsValue;
    type Solid = JsValue;

    fn create_circle(&mut self, center: Vec3, normal: Vec3, radius: f64) -> Result<JsValue, BackendError> {
        self.method(CREATE_CIRCLE)?
            .call3(&self.host, &vec_to_js(center), &vec_to_js(normal), &radius.into())
            .map_err(|e| BackendError::new(CREATE_CIRCLE, describe(&e)))
    }

    fn extrude(&mut self, curve: &JsValue, direction: Vec3, length: f64) -> Result<JsValue, BackendError> {
        self.method(EXTRUDE)?
            .call3(&self.host, curve, &vec_to_js(direction), &length.into())
            .map_err(|e| BackendError::new(EXTRUDE, describe(&e)))
    }

    fn delete(&mut self, curve: JsValue) -> Result<(), BackendError> {
        self.method(DELETE)?
            .call1(&self.host, &curve)
            .map(|_| ())
            .map_err(|e| BackendError::new(DELETE, describe(&e)))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::config::TreeParams;
    use crate::growth::grow_tree;
    use wasm_bindgen_test::*;

    /// Host object that logs each call into `this.calls`
    fn logging_host() -> JsValue {
        let host = js_sys::Object::new();
        Reflect::set(&host, &"calls".into(), &Array::new()).unwrap();
        Reflect::set(
            &host,
            &CREATE_CIRCLE.into(),
            &Function::new_with_args("c, n, r", "this.calls.push('create'); return { c: c, r: r };"),
        )
        .unwrap();
        Reflect::set(
            &host,
            &EXTRUDE.into(),
            &Function::new_with_args("curve, d, l", "this.calls.push('extrude'); return { curve: curve, l: l };"),
        )
        .unwrap();
        Reflect::set(
            &host,
            &DELETE.into(),
            &Function::new_with_args("curve", "this.calls.push('delete');"),
        )
        .unwrap();
        host.into()
    }

    fn calls(host: &JsValue) -> Vec<String> {
        let calls: Array = Reflect::get(host, &"calls".into()).unwrap().unchecked_into();
        calls.iter().filter_map(|v| v.as_string()).collect()
    }

    #[wasm_bindgen_test]
    fn test_calls_in_sequence() {
        let host = logging_host();
        let mut backend = JsGeometryBackend::new(host.clone());
        let params = TreeParams { branches: 2, ..Default::default() };

        let count = grow_tree(&params, &mut backend, Some(1)).unwrap();
        assert_eq!(count, 3);

        let log = calls(&host);
        assert_eq!(log.len(), 9);
        for chunk in log.chunks(3) {
            assert_eq!(chunk, ["create", "extrude", "delete"]);
        }
    }

    #[wasm_bindgen_test]
    fn test_missing_method() {
        let mut backend = JsGeometryBackend::new(js_sys::Object::new().into());
        let err = backend.create_circle(Vec3::ZERO, Vec3::Z, 1.0).unwrap_err();
        assert_eq!(err.operation, CREATE_CIRCLE);
    }

    #[wasm_bindgen_test]
    fn test_thrown_error_propagates() {
        let host = logging_host();
        Reflect::set(
            &host,
            &EXTRUDE.into(),
            &Function::new_with_args("curve, d, l", "throw new Error('no room');"),
        )
        .unwrap();
        let mut backend = JsGeometryBackend::new(host);
        let curve = backend.create_circle(Vec3::ZERO, Vec3::Z, 1.0).unwrap();
        let err = backend.extrude(&curve, Vec3::Z, 8.0).unwrap_err();
        assert_eq!(err.message, "no room");
    }
}
