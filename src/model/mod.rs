pub mod cache;
pub mod contract;
#[cfg(test)]
pub mod impl_fake;
pub mod impl_tract_onnx;
pub mod interface;
