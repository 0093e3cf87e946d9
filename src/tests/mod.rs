//! 单元测试模块
//! 覆盖控件属性、测量、绘制、资源解析与布局驱动

pub(crate) mod support;

pub mod root_tests;
pub mod view_tests;
