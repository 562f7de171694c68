// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use uuid::Uuid;

use crate::domain::models::category::{Category, CategoryKind};
use crate::domain::models::tag::Tag;
use crate::utils::errors::DomainError;

/// 每个岗位最多的企业性质分类数
pub const MAX_NATURE_CATEGORIES: usize = 1;
/// 每个岗位最多的其他分类数
pub const MAX_OTHER_CATEGORIES: usize = 2;

/// 校验岗位的分类选择
///
/// 所有分类必须存在且不重复，企业性质分类不超过 1 个，其他分类不超过 2 个
pub fn validate_category_selection(
    selected: &[Uuid],
    categories: &[Category],
) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    let mut nature = 0;
    let mut other = 0;

    for id in selected {
        if !seen.insert(*id) {
            return Err(DomainError::Validation(format!(
                "category {} selected more than once",
                id
            )));
        }
        let category = categories
            .iter()
            .find(|c| c.id == *id)
            .ok_or_else(|| DomainError::Validation(format!("category {} does not exist", id)))?;
        match category.kind {
            CategoryKind::Nature => nature += 1,
            CategoryKind::Other => other += 1,
        }
    }

    if nature > MAX_NATURE_CATEGORIES {
        return Err(DomainError::Validation(format!(
            "at most {} enterprise-nature category allowed, got {}",
            MAX_NATURE_CATEGORIES, nature
        )));
    }
    if other > MAX_OTHER_CATEGORIES {
        return Err(DomainError::Validation(format!(
            "at most {} other categories allowed, got {}",
            MAX_OTHER_CATEGORIES, other
        )));
    }
    Ok(())
}

/// 校验标签选择：标签必须存在且不重复
pub fn validate_tag_selection(selected: &[Uuid], tags: &[Tag]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for id in selected {
        if !seen.insert(*id) {
            return Err(DomainError::Validation(format!(
                "tag {} selected more than once",
                id
            )));
        }
        if !tags.iter().any(|t| t.id == *id) {
            return Err(DomainError::Validation(format!("tag {} does not exist", id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Category> {
        vec![
            Category::new("国企".to_string(), CategoryKind::Nature, 0),
            Category::new("外企".to_string(), CategoryKind::Nature, 1),
            Category::new("互联网".to_string(), CategoryKind::Other, 0),
            Category::new("金融".to_string(), CategoryKind::Other, 1),
            Category::new("制造".to_string(), CategoryKind::Other, 2),
        ]
    }

    #[test]
    fn test_accepts_one_nature_and_two_other() {
        let c = catalog();
        assert!(validate_category_selection(&[c[0].id, c[2].id, c[3].id], &c).is_ok());
        assert!(validate_category_selection(&[], &c).is_ok());
    }

    #[test]
    fn test_rejects_second_nature_category() {
        let c = catalog();
        let err = validate_category_selection(&[c[0].id, c[1].id], &c).unwrap_err();
        assert!(err.to_string().contains("enterprise-nature"));
    }

    #[test]
    fn test_rejects_third_other_category() {
        let c = catalog();
        let err = validate_category_selection(&[c[2].id, c[3].id, c[4].id], &c).unwrap_err();
        assert!(err.to_string().contains("other categories"));
    }

    #[test]
    fn test_rejects_unknown_and_duplicate() {
        let c = catalog();
        assert!(validate_category_selection(&[Uuid::new_v4()], &c).is_err());
        assert!(validate_category_selection(&[c[2].id, c[2].id], &c).is_err());
    }

    #[test]
    fn test_tag_selection() {
        let tags = vec![Tag::new("双休".to_string()), Tag::new("五险一金".to_string())];
        assert!(validate_tag_selection(&[tags[0].id, tags[1].id], &tags).is_ok());
        assert!(validate_tag_selection(&[tags[0].id, tags[0].id], &tags).is_err());
        assert!(validate_tag_selection(&[Uuid::new_v4()], &tags).is_err());
    }
}
