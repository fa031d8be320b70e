use stash_core::{Args, Bind, CommandTree, Error, Fields, InputError, Node, parse};

#[derive(Debug, Default, PartialEq)]
struct Show {
    id: String,
    details: bool,
}

impl Bind for Show {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .field("Id", ",positional", |d| &mut d.id)
            .field("Details", "", |d| &mut d.details);
    }
}

#[derive(Debug, Default, PartialEq)]
struct List {
    terms: Vec<String>,
    page: u32,
}

impl Bind for List {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .list("Terms", ",positional", |d| &mut d.terms)
            .field("Page", "", |d| &mut d.page);
    }
}

#[derive(Debug, PartialEq)]
enum Message {
    List(List),
    Show(Show),
    Remaining(Vec<String>),
}

fn tree() -> CommandTree<Message> {
    CommandTree::new()
        .command(
            "scenes",
            Node::bind(Message::List).child("show", Node::bind(Message::Show)),
        )
        .command(
            "raw",
            Node::handler(|args: &mut Args<'_>| {
                let rest = args
                    .map(|arg| arg.map(|arg| arg.value))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Message::Remaining(rest))
            }),
        )
}

#[test]
fn leaf_handler_binds_the_remaining_arguments() {
    let message = tree().resolve_line("scenes show 42 details").unwrap();
    assert_eq!(
        message,
        Message::Show(Show {
            id: "42".into(),
            details: true,
        })
    );
}

#[test]
fn unmatched_word_is_bound_by_the_parent() {
    let message = tree().resolve_line("scenes beach page=2").unwrap();
    assert_eq!(
        message,
        Message::List(List {
            terms: vec!["beach".into()],
            page: 2,
        })
    );
}

#[test]
fn quoted_subcommand_name_is_just_an_argument() {
    let message = tree().resolve_line(r#"scenes "show""#).unwrap();
    assert_eq!(
        message,
        Message::List(List {
            terms: vec!["show".into()],
            page: 0,
        })
    );
}

#[test]
fn binder_errors_surface_from_resolve() {
    let err = tree().resolve_line("scenes show 42 43").unwrap_err();
    assert!(matches!(err, Error::Input(InputError::Unrecognised(ref raw)) if raw == "43"));
}

#[test]
fn resolves_from_any_argument_stream() {
    let message = tree().resolve(parse("raw a 'b c'")).unwrap();
    assert_eq!(message, Message::Remaining(vec!["a".into(), "b c".into()]));
}

#[test]
fn one_tree_serves_many_threads() {
    let tree = tree();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|page| {
                let tree = &tree;
                scope.spawn(move || tree.resolve_line(&format!("scenes page={page}")).unwrap())
            })
            .collect();

        for (page, handle) in handles.into_iter().enumerate() {
            assert_eq!(
                handle.join().unwrap(),
                Message::List(List {
                    terms: vec![],
                    page: page as u32,
                })
            );
        }
    });
}
