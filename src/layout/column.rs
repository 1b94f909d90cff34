use super::{Arrangement, Constraints, CrossAxisAlignment, Layout, MainAxisAlignment, Size};
use crate::reactive::{IntoMaybeDyn, MaybeDyn};
use crate::widgets::Widget;

/// Vertical stacking layout. Child margins are honored on every side.
pub struct Column {
    spacing: MaybeDyn<f32>,
    main_axis_alignment: MainAxisAlignment,
    cross_axis_alignment: CrossAxisAlignment,
}

impl Column {
    pub fn new() -> Self {
        Self {
            spacing: MaybeDyn::Static(0.0),
            main_axis_alignment: MainAxisAlignment::Start,
            cross_axis_alignment: CrossAxisAlignment::Center,
        }
    }

    /// Set the spacing between children
    pub fn spacing(mut self, spacing: impl IntoMaybeDyn<f32>) -> Self {
        self.spacing = spacing.into_maybe_dyn();
        self
    }

    pub fn main_axis_alignment(mut self, alignment: MainAxisAlignment) -> Self {
        self.main_axis_alignment = alignment;
        self
    }

    pub fn cross_axis_alignment(mut self, alignment: CrossAxisAlignment) -> Self {
        self.cross_axis_alignment = alignment;
        self
    }

    /// Column that centers its children on both axes.
    pub fn centered() -> Self {
        Self::new().main_axis_alignment(MainAxisAlignment::Center)
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout for Column {
    fn arrange(
        &mut self,
        children: &mut [Box<dyn Widget>],
        constraints: Constraints,
    ) -> Arrangement {
        let spacing = self.spacing.get();
        let stretch = self.cross_axis_alignment == CrossAxisAlignment::Stretch
            && constraints.max_width.is_finite();

        // First pass: measure children with their margins taken out
        let mut sizes = Vec::with_capacity(children.len());
        let mut total_main = 0.0f32;
        let mut max_cross = 0.0f32;
        for child in children.iter_mut() {
            let margin = child.margin();
            let available = (constraints.max_width - margin.horizontal()).max(0.0);
            let child_constraints = Constraints {
                min_width: if stretch { available } else { 0.0 },
                min_height: 0.0,
                max_width: available,
                max_height: f32::INFINITY,
            };
            let size = child.layout(child_constraints);
            total_main += size.height + margin.vertical();
            max_cross = max_cross.max(size.width + margin.horizontal());
            sizes.push(size);
        }
        if children.len() > 1 {
            total_main += spacing * (children.len() - 1) as f32;
        }

        let width = if constraints.max_width.is_finite() {
            constraints.max_width
        } else {
            max_cross
        };
        let size = constraints.constrain(Size::new(width, total_main));

        let free = (size.height - total_main).max(0.0);
        let mut cursor = match self.main_axis_alignment {
            MainAxisAlignment::Start => 0.0,
            MainAxisAlignment::Center => free / 2.0,
            MainAxisAlignment::End => free,
        };

        // Second pass: place children
        let mut offsets = Vec::with_capacity(children.len());
        for (child, child_size) in children.iter().zip(&sizes) {
            let margin = child.margin();
            let slack = size.width - child_size.width - margin.horizontal();
            let x = match self.cross_axis_alignment {
                CrossAxisAlignment::Start | CrossAxisAlignment::Stretch => 0.0,
                CrossAxisAlignment::Center => slack / 2.0,
                CrossAxisAlignment::End => slack,
            };
            offsets.push((x + margin.left, cursor + margin.top));
            cursor += margin.vertical() + child_size.height + spacing;
        }

        Arrangement { size, offsets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Container, Padding};

    fn boxed(width: f32, height: f32) -> Box<dyn Widget> {
        Box::new(Container::new().width(width).height(height))
    }

    #[test]
    fn test_column_stacks_with_margins() {
        let mut children = vec![
            Box::new(Container::new().size(100.0, 50.0).margin(Padding::default().bottom(20.0)))
                as Box<dyn Widget>,
            boxed(100.0, 50.0),
        ];
        let mut column = Column::new();
        let arrangement = column.arrange(
            &mut children,
            Constraints::new(0.0, 0.0, 200.0, f32::INFINITY),
        );

        assert_eq!(arrangement.size, Size::new(200.0, 120.0));
        assert_eq!(arrangement.offsets, vec![(50.0, 0.0), (50.0, 70.0)]);
    }

    #[test]
    fn test_centered_column_splits_free_space() {
        let mut children = vec![boxed(40.0, 40.0)];
        let mut column = Column::centered();
        let arrangement = column.arrange(&mut children, Constraints::tight(Size::new(100.0, 100.0)));

        assert_eq!(arrangement.size, Size::new(100.0, 100.0));
        assert_eq!(arrangement.offsets, vec![(30.0, 30.0)]);
    }

    #[test]
    fn test_spacing_between_children_only() {
        let mut children = vec![boxed(10.0, 10.0), boxed(10.0, 10.0), boxed(10.0, 10.0)];
        let mut column = Column::new()
            .spacing(5.0)
            .cross_axis_alignment(CrossAxisAlignment::Start);
        let arrangement = column.arrange(&mut children, Constraints::unbounded());

        assert_eq!(arrangement.size, Size::new(10.0, 40.0));
        assert_eq!(arrangement.offsets[2], (0.0, 30.0));
    }
}
