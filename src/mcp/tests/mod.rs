//! MCP 层测试模块
//!
//! ## 测试文件命名规范
//! 测试文件名 = 源文件名 + `_tests.rs`
