use super::{min_chars, non_empty, optional_text, Form, ValidationErrors};
use crate::model::{Blog, ContentBlock};
use chrono::NaiveDate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogForm {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub image: String,
    pub content: Vec<ContentBlock>,
}

impl BlogForm {
    pub fn add_block(&mut self, text: impl Into<String>, image: Option<String>) {
        self.content.push(ContentBlock {
            text: text.into(),
            image,
        });
    }

    pub fn remove_block(&mut self, index: usize) -> Option<ContentBlock> {
        (index < self.content.len()).then(|| self.content.remove(index))
    }
}

impl Form for BlogForm {
    type Output = Blog;

    fn validate(&self) -> Result<Blog, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            min_chars(&self.title, 2),
            "title",
            "Blog title must be at least 2 characters.",
        );
        errors.check(non_empty(&self.image), "image", "Please upload a blog image.");
        errors.check(
            !self.content.is_empty(),
            "content",
            "Please add at least one content block.",
        );
        for (i, block) in self.content.iter().enumerate() {
            errors.check(
                non_empty(&block.text),
                &format!("content[{}].text", i),
                "Content cannot be empty.",
            );
        }

        errors.finish(|| Blog {
            title: self.title.trim().to_string(),
            date: self.date,
            image: self.image.clone(),
            content: self
                .content
                .iter()
                .map(|b| ContentBlock {
                    text: b.text.clone(),
                    image: b.image.as_deref().and_then(optional_text),
                })
                .collect(),
        })
    }

    fn from_entity(blog: &Blog) -> Self {
        Self {
            title: blog.title.clone(),
            date: blog.date,
            image: blog.image.clone(),
            content: blog.content.clone(),
        }
    }
}
