use dev_test_runner::ast::*;
use dev_test_runner::{Object, Token};

fn tok(lexeme: &str) -> Token {
    Token::new(lexeme, 1)
}

fn num(n: f64) -> Expr {
    Literal::new(Object::Number(n)).into()
}

fn var(name: &str) -> Expr {
    Variable::new(tok(name)).into()
}

/// Returns which visitor method ran.
struct Sentinel;

impl ExprVisitor<&'static str> for Sentinel {
    fn visit_assign_expr(&mut self, _: &Assign) -> &'static str { "assign" }
    fn visit_binary_expr(&mut self, _: &Binary) -> &'static str { "binary" }
    fn visit_call_expr(&mut self, _: &Call) -> &'static str { "call" }
    fn visit_get_expr(&mut self, _: &Get) -> &'static str { "get" }
    fn visit_grouping_expr(&mut self, _: &Grouping) -> &'static str { "grouping" }
    fn visit_literal_expr(&mut self, _: &Literal) -> &'static str { "literal" }
    fn visit_logical_expr(&mut self, _: &Logical) -> &'static str { "logical" }
    fn visit_set_expr(&mut self, _: &Set) -> &'static str { "set" }
    fn visit_super_expr(&mut self, _: &Super) -> &'static str { "super" }
    fn visit_this_expr(&mut self, _: &This) -> &'static str { "this" }
    fn visit_unary_expr(&mut self, _: &Unary) -> &'static str { "unary" }
    fn visit_variable_expr(&mut self, _: &Variable) -> &'static str { "variable" }
}

impl StmtVisitor<&'static str> for Sentinel {
    fn visit_block_stmt(&mut self, _: &Block) -> &'static str { "block" }
    fn visit_class_stmt(&mut self, _: &Class) -> &'static str { "class" }
    fn visit_expression_stmt(&mut self, _: &Expression) -> &'static str { "expression" }
    fn visit_function_stmt(&mut self, _: &Function) -> &'static str { "function" }
    fn visit_if_stmt(&mut self, _: &If) -> &'static str { "if" }
    fn visit_print_stmt(&mut self, _: &Print) -> &'static str { "print" }
    fn visit_return_stmt(&mut self, _: &Return) -> &'static str { "return" }
    fn visit_var_stmt(&mut self, _: &Var) -> &'static str { "var" }
    fn visit_while_stmt(&mut self, _: &While) -> &'static str { "while" }
}

#[test]
fn every_expr_variant_dispatches_to_its_own_method() {
    let cases: Vec<(Expr, &str)> = vec![
        (Assign::new(tok("a"), Box::new(num(1.0))).into(), "assign"),
        (Binary::new(Box::new(num(1.0)), tok("+"), Box::new(num(2.0))).into(), "binary"),
        (Call::new(Box::new(var("f")), tok(")"), vec![num(1.0)]).into(), "call"),
        (Get::new(Box::new(var("o")), tok("x")).into(), "get"),
        (Grouping::new(Box::new(num(1.0))).into(), "grouping"),
        (Literal::new(Object::Nil).into(), "literal"),
        (Logical::new(Box::new(var("a")), tok("or"), Box::new(var("b"))).into(), "logical"),
        (Set::new(Box::new(var("o")), tok("x"), Box::new(num(3.0))).into(), "set"),
        (Super::new(tok("super"), tok("init")).into(), "super"),
        (This::new(tok("this")).into(), "this"),
        (Unary::new(tok("-"), Box::new(num(1.0))).into(), "unary"),
        (Variable::new(tok("x")).into(), "variable"),
    ];
    for (expr, expected) in cases {
        assert_eq!(expr.accept(&mut Sentinel), expected, "{expr:?}");
    }
}

#[test]
fn every_stmt_variant_dispatches_to_its_own_method() {
    let print = Stmt::from(Print::new(num(1.0)));
    let function = Function::new(tok("f"), vec![tok("a")], vec![print.clone()]);
    let cases: Vec<(Stmt, &str)> = vec![
        (Block::new(vec![print.clone()]).into(), "block"),
        (Class::new(tok("C"), Some(Variable::new(tok("B"))), vec![function.clone()]).into(), "class"),
        (Expression::new(num(1.0)).into(), "expression"),
        (function.into(), "function"),
        (If::new(var("c"), Box::new(print.clone()), None).into(), "if"),
        (print.clone(), "print"),
        (Return::new(tok("return"), Some(num(1.0))).into(), "return"),
        (Var::new(tok("x"), None).into(), "var"),
        (While::new(var("c"), Box::new(print)).into(), "while"),
    ];
    for (stmt, expected) in cases {
        assert_eq!(stmt.accept(&mut Sentinel), expected, "{stmt:?}");
    }
}

#[test]
fn variant_accept_matches_base_accept() {
    let unary = Unary::new(tok("!"), Box::new(Literal::new(Object::Bool(true)).into()));
    assert_eq!(unary.accept(&mut Sentinel), "unary");
    assert_eq!(Expr::from(unary).accept(&mut Sentinel), "unary");
}

#[test]
fn dispatch_through_a_trait_object() {
    let expr = var("x");
    let visitor: &mut dyn ExprVisitor<&'static str> = &mut Sentinel;
    assert_eq!(expr.accept(visitor), "variable");
}

#[test]
fn constructor_assigns_fields_positionally() {
    let left = Box::new(num(1.0));
    let right = Box::new(var("y"));
    let binary = Binary::new(left.clone(), tok("*"), right.clone());
    assert_eq!(binary.left, left);
    assert_eq!(binary.operator, tok("*"));
    assert_eq!(binary.right, right);

    let set = Set::new(Box::new(var("o")), tok("field"), Box::new(num(2.0)));
    assert_eq!(*set.object, var("o"));
    assert_eq!(set.name.lexeme, "field");
    assert_eq!(*set.value, num(2.0));

    let stmt = If::new(var("c"), Box::new(Print::new(num(1.0)).into()), None);
    assert_eq!(stmt.condition, var("c"));
    assert!(stmt.else_branch.is_none());
}

/// Parenthesised prefix printer.
struct AstPrinter;

impl AstPrinter {
    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut out = format!("({name}");
        for expr in exprs {
            out.push(' ');
            out.push_str(&expr.accept(self));
        }
        out.push(')');
        out
    }
}

impl ExprVisitor<String> for AstPrinter {
    fn visit_assign_expr(&mut self, expr: &Assign) -> String {
        self.parenthesize(&format!("= {}", expr.name.lexeme), &[&*expr.value])
    }
    fn visit_binary_expr(&mut self, expr: &Binary) -> String {
        self.parenthesize(&expr.operator.lexeme, &[&*expr.left, &*expr.right])
    }
    fn visit_call_expr(&mut self, expr: &Call) -> String {
        let mut args = vec![&*expr.callee];
        args.extend(expr.arguments.iter());
        self.parenthesize("call", &args)
    }
    fn visit_get_expr(&mut self, expr: &Get) -> String {
        self.parenthesize(&format!(". {}", expr.name.lexeme), &[&*expr.object])
    }
    fn visit_grouping_expr(&mut self, expr: &Grouping) -> String {
        self.parenthesize("group", &[&*expr.expression])
    }
    fn visit_literal_expr(&mut self, expr: &Literal) -> String {
        match &expr.value {
            Object::Nil => "nil".to_string(),
            Object::Bool(b) => b.to_string(),
            Object::Number(n) => n.to_string(),
            Object::Str(s) => s.clone(),
        }
    }
    fn visit_logical_expr(&mut self, expr: &Logical) -> String {
        self.parenthesize(&expr.operator.lexeme, &[&*expr.left, &*expr.right])
    }
    fn visit_set_expr(&mut self, expr: &Set) -> String {
        self.parenthesize(&format!("= . {}", expr.name.lexeme), &[&*expr.object, &*expr.value])
    }
    fn visit_super_expr(&mut self, expr: &Super) -> String {
        format!("(super {})", expr.method.lexeme)
    }
    fn visit_this_expr(&mut self, _: &This) -> String {
        "this".to_string()
    }
    fn visit_unary_expr(&mut self, expr: &Unary) -> String {
        self.parenthesize(&expr.operator.lexeme, &[&*expr.right])
    }
    fn visit_variable_expr(&mut self, expr: &Variable) -> String {
        expr.name.lexeme.clone()
    }
}

#[test]
fn printer_walks_nested_expressions() {
    let expr: Expr = Binary::new(
        Box::new(Unary::new(tok("-"), Box::new(num(123.0))).into()),
        tok("*"),
        Box::new(Grouping::new(Box::new(num(45.67))).into()),
    )
    .into();
    assert_eq!(expr.accept(&mut AstPrinter), "(* (- 123) (group 45.67))");

    let call: Expr = Call::new(
        Box::new(Get::new(Box::new(var("point")), tok("scale")).into()),
        tok(")"),
        vec![num(2.0), Literal::new(Object::Str("x".into())).into()],
    )
    .into();
    assert_eq!(call.accept(&mut AstPrinter), "(call (. scale point) 2 x)");
}
