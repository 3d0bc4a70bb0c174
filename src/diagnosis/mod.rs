pub mod report;
pub mod service;
#[cfg(test)]
mod test;
