// Element ids the studio page renders; binding fails fast when one is absent.
pub(crate) const GENERATE_BUTTON_ID: &str = "generate-btn";
pub(crate) const CODE_OUTPUT_ID: &str = "code-output";
pub(crate) const COPY_BUTTON_ID: &str = "copy-btn";
pub(crate) const DOWNLOAD_BUTTON_ID: &str = "download-btn";
pub(crate) const TASK_DESCRIPTION_ID: &str = "task-description";
pub(crate) const TOOL_GUIDE_ID: &str = "tool-guide";
