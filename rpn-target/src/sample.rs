use crate::{common::*, misc::Label};

/// Flips excess foreground labels to ignore, keeping at most `num_fg` of
/// them, chosen uniformly without replacement.
pub fn subsample_positive_labels<R>(labels: &mut [Label], num_fg: usize, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let mut fg_inds: Vec<usize> = labels
        .iter()
        .positions(|&label| label == Label::Positive)
        .collect();
    if fg_inds.len() <= num_fg {
        return;
    }

    let excess = fg_inds.len() - num_fg;
    fg_inds.shuffle(rng);
    for &index in &fg_inds[..excess] {
        labels[index] = Label::Ignore;
    }
}

/// Flips excess background labels to ignore so that foreground plus
/// background stays within `batch_size`.
pub fn subsample_negative_labels<R>(labels: &mut [Label], batch_size: usize, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let num_fg = labels
        .iter()
        .filter(|&&label| label == Label::Positive)
        .count();
    let num_bg = batch_size.saturating_sub(num_fg);

    let mut bg_inds: Vec<usize> = labels
        .iter()
        .positions(|&label| label == Label::Negative)
        .collect();
    if bg_inds.len() <= num_bg {
        return;
    }

    let excess = bg_inds.len() - num_bg;
    bg_inds.shuffle(rng);
    for &index in &bg_inds[..excess] {
        labels[index] = Label::Ignore;
    }
}

/// Balances the labels to a mini-batch of `batch_size` anchors of which at
/// most `floor(fg_fraction * batch_size)` are foreground.
///
/// Under-subscription is allowed; the batch may end up smaller than
/// `batch_size`.
pub fn balance<R>(labels: &mut [Label], batch_size: usize, fg_fraction: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let num_fg = (fg_fraction * batch_size as f64).floor() as usize;
    subsample_positive_labels(labels, num_fg, rng);
    subsample_negative_labels(labels, batch_size, rng);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(labels: &[Label], label: Label) -> usize {
        labels.iter().filter(|&&it| it == label).count()
    }

    #[test]
    fn subsample_positive_trims_to_quota() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut labels = vec![Label::Positive; 10];
        labels.extend(vec![Label::Negative; 5]);

        subsample_positive_labels(&mut labels, 4, &mut rng);

        assert_eq!(count(&labels, Label::Positive), 4);
        assert_eq!(count(&labels, Label::Ignore), 6);
        assert_eq!(count(&labels, Label::Negative), 5);
    }

    #[test]
    fn subsample_positive_under_subscription_is_untouched() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut labels = vec![Label::Positive; 3];

        subsample_positive_labels(&mut labels, 4, &mut rng);

        assert_eq!(labels, vec![Label::Positive; 3]);
    }

    #[test]
    fn subsample_negative_fills_remaining_batch() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut labels = vec![Label::Positive; 2];
        labels.extend(vec![Label::Negative; 10]);

        subsample_negative_labels(&mut labels, 8, &mut rng);

        assert_eq!(count(&labels, Label::Positive), 2);
        assert_eq!(count(&labels, Label::Negative), 6);
        assert_eq!(count(&labels, Label::Ignore), 4);
    }

    #[test]
    fn balance_caps_both_classes() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut labels = vec![Label::Positive; 300];
        labels.extend(vec![Label::Negative; 300]);

        balance(&mut labels, 256, 0.5, &mut rng);

        assert_eq!(count(&labels, Label::Positive), 128);
        assert_eq!(count(&labels, Label::Negative), 128);
    }

    #[test]
    fn balance_is_reproducible_with_a_seeded_rng() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(7);
            let mut labels = vec![Label::Positive; 20];
            labels.extend(vec![Label::Negative; 20]);
            balance(&mut labels, 16, 0.5, &mut rng);
            labels
        };
        assert_eq!(run(), run());
    }
}
