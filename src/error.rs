#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("need to position workflow first: node {index} has no {missing} coordinate")]
    PositionRequired { index: usize, missing: &'static str },

    #[error("link {link} references node {node} but the workflow has {count} nodes")]
    LinkOutOfRange {
        link: usize,
        node: usize,
        count: usize,
    },
}

pub type Result<T> = std::result::Result<T, RenderError>;
