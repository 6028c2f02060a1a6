//! 设置面板描述
//! 只描述字段，渲染由宿主负责

/// 文本框类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextType {
    Default,
}

/// 属性类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Text(TextType),
}

/// 单个属性
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub description: String,
    pub kind: PropertyKind,
    pub long_description: Option<String>,
}

impl Property {
    /// 悬浮帮助说明
    pub fn set_long_description(&mut self, text: &str) -> &mut Self {
        self.long_description = Some(text.to_string());
        self
    }
}

/// 属性列表（保持添加顺序）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    props: Vec<Property>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_text(&mut self, name: &str, description: &str, text_type: TextType) -> &mut Property {
        self.props.push(Property {
            name: name.to_string(),
            description: description.to_string(),
            kind: PropertyKind::Text(text_type),
            long_description: None,
        });
        let idx = self.props.len() - 1;
        &mut self.props[idx]
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.props.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.props.iter()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}
