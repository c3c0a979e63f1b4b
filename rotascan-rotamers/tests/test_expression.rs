#[cfg(test)]
mod test_symbolic_expressions {
    use std::collections::BTreeSet;
    use std::f64::consts::PI;
    use rotascan_rotamers::Expr;

    #[test]
    fn constants_fold_on_construction() {
        let e = Expr::sum(Expr::constant(2.0), Expr::constant(3.0));
        assert_eq!(e, Expr::Const(5.0));
        let e = Expr::product(Expr::constant(2.0), Expr::constant(3.0));
        assert_eq!(e, Expr::Const(6.0));
        let e = Expr::cos(Expr::constant(0.0));
        assert_eq!(e, Expr::Const(1.0));
        let e = Expr::neg(Expr::constant(1.5));
        assert_eq!(e, Expr::Const(-1.5));
    }

    #[test]
    fn neutral_elements_vanish() {
        let x = Expr::variable(0);
        assert_eq!(Expr::sum(Expr::constant(0.0), x.clone()), x);
        assert_eq!(Expr::product(Expr::constant(1.0), x.clone()), x);
        assert_eq!(Expr::product(Expr::constant(0.0), Expr::sin(x.clone())), Expr::Const(0.0));
        // --- double negation cancels
        assert_eq!(Expr::neg(Expr::neg(x.clone())), x);
    }

    #[test]
    fn evaluation_substitutes_variables() {
        // --- cos(x0) * 2 + sin(x1)
        let e = Expr::sum(
            Expr::product(Expr::cos(Expr::variable(0)), Expr::constant(2.0)),
            Expr::sin(Expr::variable(1)));
        let value = e.eval(&[PI, PI / 2.0]);
        assert!((value - (-2.0 + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn variables_are_collected() {
        let e = Expr::sum(
            Expr::product(Expr::cos(Expr::variable(2)), Expr::variable(0)),
            Expr::constant(4.0));
        let mut variables = BTreeSet::new();
        e.collect_variables(&mut variables);
        assert_eq!(variables.into_iter().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn display_renders_the_tree() {
        let e = Expr::sum(Expr::cos(Expr::variable(0)), Expr::constant(1.0));
        assert_eq!(format!("{}", e), "(cos(x0) + 1)");
    }
}
