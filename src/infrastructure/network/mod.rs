pub mod google;
pub mod http;
pub mod youdao;
