/// File name offered by the download affordance.
pub const DOWNLOAD_FILE_NAME: &str = "data_pipeline.py";

/// MIME type of the downloaded artifact.
pub const DOWNLOAD_MIME: &str = "text/plain";

/// Prefix for the transport-failure placeholder; the transport error's own
/// description is appended verbatim.
pub const GENERATE_TRANSPORT_PREFIX: &str = "# 生成失败：";

/// Fixed user-facing strings, keyed by purpose so shells and tests reference
/// one table instead of duplicating literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Guide region text after any guide-load failure.
    GuideLoadFailed,
    /// Output placeholder while a generation request is in flight.
    GenerateWorking,
    /// Output placeholder for a failed or empty generation result.
    GenerateFailed,
    /// Blocking notice shown when the task description is empty.
    EmptyTaskDescription,
    /// Confirmation shown after copying the output to the clipboard.
    CopySucceeded,
}

impl Notice {
    pub const fn text(self) -> &'static str {
        match self {
            Self::GuideLoadFailed => "加载工具库说明失败",
            Self::GenerateWorking => "# 正在生成代码，请稍候...",
            Self::GenerateFailed => "# 生成失败，请重试",
            Self::EmptyTaskDescription => "请输入任务描述",
            Self::CopySucceeded => "代码已复制到剪贴板！",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_table_preserves_source_literals() {
        assert_eq!(Notice::GuideLoadFailed.text(), "加载工具库说明失败");
        assert_eq!(Notice::GenerateWorking.text(), "# 正在生成代码，请稍候...");
        assert_eq!(Notice::GenerateFailed.text(), "# 生成失败，请重试");
        assert_eq!(Notice::EmptyTaskDescription.text(), "请输入任务描述");
        assert_eq!(Notice::CopySucceeded.text(), "代码已复制到剪贴板！");
    }

    #[test]
    fn download_artifact_keeps_fixed_name_and_type() {
        assert_eq!(DOWNLOAD_FILE_NAME, "data_pipeline.py");
        assert_eq!(DOWNLOAD_MIME, "text/plain");
    }
}
