use super::{min_chars, non_empty, non_negative, optional_text, Form, ValidationErrors};
use crate::model::{Availability, Color, Product, Size, Variant};

/// The "add variant" sub-form.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantForm {
    pub size: Option<Size>,
    pub color: Option<Color>,
    pub price: f64,
    pub mrp: f64,
    pub available: Availability,
}

impl Default for VariantForm {
    fn default() -> Self {
        Self {
            size: None,
            color: None,
            price: 0.0,
            mrp: 0.0,
            available: Availability::Yes,
        }
    }
}

impl From<&Variant> for VariantForm {
    fn from(v: &Variant) -> Self {
        Self {
            size: Some(v.size),
            color: Some(v.color),
            price: v.price,
            mrp: v.mrp,
            available: v.available,
        }
    }
}

impl VariantForm {
    pub fn validate(&self) -> Result<Variant, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(self.size.is_some(), "size", "Please select a size");
        errors.check(self.color.is_some(), "color", "Please select a color");
        errors.check(non_negative(self.price), "price", "Price must be positive");
        errors.check(non_negative(self.mrp), "mrp", "MRP must be positive");

        match (self.size, self.color) {
            (Some(size), Some(color)) if errors.is_empty() => Ok(Variant {
                size,
                color,
                price: self.price,
                mrp: self.mrp,
                available: self.available,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub title: String,
    /// Empty means no description.
    pub description: String,
    pub rating: f64,
    pub image: String,
    variants: Vec<Variant>,
}

impl ProductForm {
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Validate the sub-form and append its variant.
    pub fn add_variant(&mut self, variant: &VariantForm) -> Result<(), ValidationErrors> {
        self.variants.push(variant.validate()?);
        Ok(())
    }

    /// Replace the variant at `index` (0-based).
    pub fn replace_variant(
        &mut self,
        index: usize,
        variant: &VariantForm,
    ) -> Result<(), ValidationErrors> {
        let validated = variant.validate()?;
        match self.variants.get_mut(index) {
            Some(slot) => {
                *slot = validated;
                Ok(())
            }
            None => Err(ValidationErrors::single(
                "variants",
                format!("No variant at position {}", index + 1),
            )),
        }
    }

    pub fn remove_variant(&mut self, index: usize) -> Option<Variant> {
        (index < self.variants.len()).then(|| self.variants.remove(index))
    }
}

impl Form for ProductForm {
    type Output = Product;

    fn validate(&self) -> Result<Product, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            min_chars(&self.title, 2),
            "title",
            "Product title must be at least 2 characters.",
        );
        errors.check(
            (0.0..=5.0).contains(&self.rating),
            "rating",
            "Rating must be between 0 and 5.",
        );
        errors.check(non_empty(&self.image), "image", "Please upload an image");
        errors.check(
            !self.variants.is_empty(),
            "variants",
            "Please add at least one product variant",
        );

        errors.finish(|| Product {
            title: self.title.trim().to_string(),
            description: optional_text(&self.description),
            rating: self.rating,
            image: self.image.clone(),
            variants: self.variants.clone(),
        })
    }

    fn from_entity(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone().unwrap_or_default(),
            rating: product.rating,
            image: product.image.clone(),
            variants: product.variants.clone(),
        }
    }
}
