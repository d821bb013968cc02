//! 0-100 SEO quality score.

use crate::models::SeoProfile;

/// The figures the score is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeoInputs {
    pub title_length: usize,
    pub description_length: usize,
    pub h1_count: usize,
    pub h2_count: usize,
    pub total_images: usize,
    pub images_without_alt: usize,
    pub word_count: usize,
    pub internal_links: usize,
    pub has_canonical: bool,
    pub has_lang: bool,
}

impl SeoInputs {
    /// Reads the inputs off a profile plus the page word count.
    pub fn from_profile(seo: &SeoProfile, word_count: usize) -> Self {
        SeoInputs {
            title_length: seo.title_tag.chars().count(),
            description_length: seo.meta_description.chars().count(),
            h1_count: seo.heading_structure.count(1),
            h2_count: seo.heading_structure.count(2),
            total_images: seo.total_images(),
            images_without_alt: seo.images_without_alt,
            word_count,
            internal_links: seo.internal_links,
            has_canonical: !seo.canonical_url.is_empty(),
            has_lang: !seo.lang.is_empty(),
        }
    }
}

/// Length band shared by title and description.
fn length_points(length: usize, optimal: (usize, usize), partial: (usize, usize)) -> f64 {
    if length == 0 {
        0.0
    } else if (optimal.0..=optimal.1).contains(&length) {
        20.0
    } else if (partial.0..=partial.1).contains(&length) {
        15.0
    } else {
        5.0
    }
}

pub(crate) fn title_points(length: usize) -> f64 {
    length_points(length, (30, 60), (20, 80))
}

pub(crate) fn description_points(length: usize) -> f64 {
    length_points(length, (120, 160), (100, 200))
}

pub(crate) fn heading_points(h1_count: usize, h2_count: usize) -> f64 {
    let h1 = match h1_count {
        0 => 0.0,
        1 => 10.0,
        _ => 5.0,
    };
    let h2 = if h2_count > 0 { 10.0 } else { 0.0 };
    h1 + h2
}

/// `None` when more images lack alt text than there are images.
fn image_points(total: usize, without_alt: usize) -> Option<f64> {
    if total == 0 {
        return Some(15.0);
    }
    let with_alt = total.checked_sub(without_alt)?;
    Some((15.0 * with_alt as f64 / total as f64).floor())
}

fn word_points(word_count: usize) -> f64 {
    match word_count {
        300.. => 10.0,
        150.. => 7.0,
        50.. => 3.0,
        _ => 0.0,
    }
}

fn internal_link_points(internal_links: usize) -> f64 {
    match internal_links {
        3.. => 10.0,
        1.. => 7.0,
        _ => 0.0,
    }
}

fn technical_points(has_canonical: bool, has_lang: bool) -> f64 {
    let mut points = 0.0;
    if has_canonical {
        points += 2.5;
    }
    if has_lang {
        points += 2.5;
    }
    points
}

/// Scores the inputs on a 0-100 scale.
///
/// Sub-scores: title 20, description 20, headings 20, image alt coverage 15,
/// content length 10, internal links 10, canonical and language 2.5 each.
/// The sum is floored and capped at 100. Inconsistent inputs score 0.
pub fn calculate_seo_score(inputs: &SeoInputs) -> u8 {
    let Some(images) = image_points(inputs.total_images, inputs.images_without_alt) else {
        log::warn!(
            "SEO score skipped: {} images without alt out of {}",
            inputs.images_without_alt,
            inputs.total_images
        );
        return 0;
    };
    let total = title_points(inputs.title_length)
        + description_points(inputs.description_length)
        + heading_points(inputs.h1_count, inputs.h2_count)
        + images
        + word_points(inputs.word_count)
        + internal_link_points(inputs.internal_links)
        + technical_points(inputs.has_canonical, inputs.has_lang);
    total.floor().min(100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bands() {
        assert_eq!(title_points(0), 0.0);
        assert_eq!(title_points(4), 5.0);
        assert_eq!(title_points(20), 15.0);
        assert_eq!(title_points(30), 20.0);
        assert_eq!(title_points(60), 20.0);
        assert_eq!(title_points(80), 15.0);
        assert_eq!(title_points(81), 5.0);
    }

    #[test]
    fn test_description_bands() {
        assert_eq!(description_points(0), 0.0);
        assert_eq!(description_points(50), 5.0);
        assert_eq!(description_points(100), 15.0);
        assert_eq!(description_points(140), 20.0);
        assert_eq!(description_points(201), 5.0);
    }

    #[test]
    fn test_heading_points() {
        assert_eq!(heading_points(1, 1), 20.0);
        assert_eq!(heading_points(1, 0), 10.0);
        assert_eq!(heading_points(2, 3), 15.0);
        assert_eq!(heading_points(0, 2), 10.0);
        assert_eq!(heading_points(0, 0), 0.0);
    }

    #[test]
    fn test_image_points_ratio_is_floored() {
        assert_eq!(image_points(0, 0), Some(15.0));
        assert_eq!(image_points(3, 1), Some(10.0));
        assert_eq!(image_points(4, 1), Some(11.0));
        assert_eq!(image_points(2, 3), None);
    }

    #[test]
    fn test_short_home_page_scores_43() {
        let inputs = SeoInputs {
            title_length: 4,
            h1_count: 1,
            h2_count: 2,
            word_count: 50,
            ..Default::default()
        };
        assert_eq!(calculate_seo_score(&inputs), 43);
    }

    #[test]
    fn test_perfect_page_caps_at_100() {
        let inputs = SeoInputs {
            title_length: 45,
            description_length: 140,
            h1_count: 1,
            h2_count: 4,
            total_images: 2,
            images_without_alt: 0,
            word_count: 800,
            internal_links: 12,
            has_canonical: true,
            has_lang: true,
        };
        assert_eq!(calculate_seo_score(&inputs), 100);
    }

    #[test]
    fn test_half_technical_points_floor() {
        let inputs = SeoInputs {
            has_canonical: true,
            ..Default::default()
        };
        // 15 for no images + 2.5, floored
        assert_eq!(calculate_seo_score(&inputs), 17);
    }

    #[test]
    fn test_inconsistent_images_score_zero() {
        let inputs = SeoInputs {
            title_length: 45,
            total_images: 1,
            images_without_alt: 2,
            ..Default::default()
        };
        assert_eq!(calculate_seo_score(&inputs), 0);
    }

    #[test]
    fn test_score_never_exceeds_100() {
        for words in [0usize, 60, 200, 400] {
            for links in [0usize, 1, 5] {
                let inputs = SeoInputs {
                    title_length: 40,
                    description_length: 130,
                    h1_count: 1,
                    h2_count: 1,
                    word_count: words,
                    internal_links: links,
                    has_canonical: true,
                    has_lang: true,
                    ..Default::default()
                };
                assert!(calculate_seo_score(&inputs) <= 100);
            }
        }
    }
}
