use tablesmith_core::MockType;
use tablesmith_generate::{GeneratorRegistry, RandomKind};

fn main() {
    let registry = GeneratorRegistry::global();
    for mock_type in MockType::ALL {
        let generator = registry.resolve(Some(*mock_type));
        println!("{}", generator.mock_type());
    }
    let kinds: Vec<_> = RandomKind::ALL.iter().map(|kind| kind.as_str()).collect();
    println!("random kinds: {}", kinds.join(", "));
}
