//! Example set shipped with the binary, used when no catalogue file is
//! configured. Kept intentionally small; real deployments point the config at
//! a full catalogue file.

use super::{Category, ExampleStep, PatternExample};

/// Build the built-in examples.
pub(super) fn examples() -> Vec<PatternExample> {
    vec![
        PatternExample {
            id: "logger-singleton".into(),
            title: "Application-wide logger".into(),
            category: Category::Creational,
            code: r#"class Logger {
    private static Logger instance;
    private Logger() {}

    public static Logger getInstance() {
        if (instance == null) {
            instance = new Logger();
        }
        return instance;
    }

    public void log(String message) {
        System.out.println("[LOG] " + message);
    }
}"#
            .into(),
            patterns: vec!["Singleton".into()],
            explanation: "Only one logger may exist so every component writes to the same \
                          sink. The class hides its constructor and hands out a single \
                          lazily-created instance."
                .into(),
            steps: vec![
                ExampleStep {
                    title: "Hide the constructor".into(),
                    description: "A private constructor prevents arbitrary instantiation."
                        .into(),
                    code: "private Logger() {}".into(),
                },
                ExampleStep {
                    title: "Expose one access point".into(),
                    description: "getInstance creates the instance on first use and returns \
                                  the same object afterwards."
                        .into(),
                    code: "public static Logger getInstance() { ... }".into(),
                },
            ],
            advantages: vec![
                "A single shared instance with global access".into(),
                "Lazy creation avoids paying for an unused logger".into(),
            ],
        },
        PatternExample {
            id: "report-builder".into(),
            title: "Step-by-step report assembly".into(),
            category: Category::Creational,
            code: r#"Report report = new ReportBuilder()
    .withTitle("Quarterly results")
    .withHeader("ACME Corp")
    .withTable(salesFigures)
    .withFooter("confidential")
    .build();"#
                .into(),
            patterns: vec!["Builder".into()],
            explanation: "Report construction takes many optional parts. The builder \
                          collects them step by step and produces the finished object in \
                          one final call, keeping the Report itself immutable."
                .into(),
            steps: vec![ExampleStep {
                title: "Chain configuration calls".into(),
                description: "Each with* method records one optional part and returns the \
                              builder for chaining."
                    .into(),
                code: "public ReportBuilder withTitle(String title) { ... return this; }".into(),
            }],
            advantages: vec![
                "No telescoping constructors".into(),
                "The assembled object can stay immutable".into(),
            ],
        },
        PatternExample {
            id: "ui-widget-factory".into(),
            title: "Platform widget creation".into(),
            category: Category::Creational,
            code: r#"interface WidgetFactory {
    Button createButton();
    Checkbox createCheckbox();
}

class MacFactory implements WidgetFactory {
    public Button createButton() { return new MacButton(); }
    public Checkbox createCheckbox() { return new MacCheckbox(); }
}

class WinFactory implements WidgetFactory {
    public Button createButton() { return new WinButton(); }
    public Checkbox createCheckbox() { return new WinCheckbox(); }
}"#
            .into(),
            patterns: vec!["Abstract Factory".into(), "Factory Method".into()],
            explanation: "The application asks an abstract factory for related widgets and \
                          never names concrete platform classes. Each factory method defers \
                          the decision which class to instantiate to the platform-specific \
                          subclass."
                .into(),
            steps: vec![ExampleStep {
                title: "Group related products".into(),
                description: "The factory interface creates a whole family of widgets that \
                              must match each other."
                    .into(),
                code: "interface WidgetFactory { Button createButton(); ... }".into(),
            }],
            advantages: vec![
                "Platform families stay consistent".into(),
                "New platforms slot in without touching client code".into(),
            ],
        },
        PatternExample {
            id: "legacy-payment-adapter".into(),
            title: "Wrapping a legacy payment client".into(),
            category: Category::Structural,
            code: r#"class LegacyPayClient {
    public void makeTransfer(String acc, long cents) { ... }
}

class PaymentAdapter implements PaymentGateway {
    private final LegacyPayClient legacy = new LegacyPayClient();

    public void pay(Payment payment) {
        legacy.makeTransfer(payment.account(), payment.amountInCents());
    }
}"#
            .into(),
            patterns: vec!["Adapter".into()],
            explanation: "The shop code speaks PaymentGateway, the vendor library speaks \
                          its own dialect. The adapter translates between the two so \
                          neither side changes."
                .into(),
            steps: vec![ExampleStep {
                title: "Implement the target interface".into(),
                description: "The adapter satisfies the interface the application expects \
                              and delegates to the legacy API."
                    .into(),
                code: "class PaymentAdapter implements PaymentGateway { ... }".into(),
            }],
            advantages: vec!["Incompatible interfaces cooperate without rewrites".into()],
        },
        PatternExample {
            id: "stream-decorators".into(),
            title: "Composable stream wrappers".into(),
            category: Category::Structural,
            code: r#"InputStream in =
    new BufferedInputStream(
        new GZIPInputStream(
            new FileInputStream("data.gz")));"#
                .into(),
            patterns: vec!["Decorator".into(), "Composite".into()],
            explanation: "Each wrapper adds one behavior (buffering, decompression) while \
                          exposing the same stream interface, so wrappers nest to any \
                          depth and the consumer treats the whole chain as one stream."
                .into(),
            steps: vec![ExampleStep {
                title: "Wrap, don't subclass".into(),
                description: "Behaviors combine at runtime by nesting wrappers instead of \
                              multiplying subclasses."
                    .into(),
                code: "new BufferedInputStream(new GZIPInputStream(raw))".into(),
            }],
            advantages: vec![
                "Behaviors combine freely at runtime".into(),
                "No subclass explosion".into(),
            ],
        },
        PatternExample {
            id: "price-feed-observer".into(),
            title: "Price ticker subscriptions".into(),
            category: Category::Behavioral,
            code: r#"class PriceFeed {
    private final List<PriceListener> listeners = new ArrayList<>();

    public void subscribe(PriceListener listener) {
        listeners.add(listener);
    }

    private void publish(Quote quote) {
        for (PriceListener listener : listeners) {
            listener.onQuote(quote);
        }
    }
}"#
            .into(),
            patterns: vec!["Observer".into()],
            explanation: "Charts, alerts, and tickers all react to price changes without \
                          the feed knowing any of them. Listeners register themselves and \
                          the feed notifies whoever is currently subscribed."
                .into(),
            steps: vec![ExampleStep {
                title: "Decouple publisher from subscribers".into(),
                description: "The feed only depends on the listener interface, never on \
                              concrete consumers."
                    .into(),
                code: "public void subscribe(PriceListener listener) { ... }".into(),
            }],
            advantages: vec![
                "Publishers and subscribers evolve independently".into(),
                "Subscribers can come and go at runtime".into(),
            ],
        },
        PatternExample {
            id: "route-strategy".into(),
            title: "Switchable route planning".into(),
            category: Category::Behavioral,
            code: r#"interface RouteStrategy {
    Route plan(Point from, Point to);
}

class Navigator {
    private RouteStrategy strategy;

    public void setStrategy(RouteStrategy strategy) {
        this.strategy = strategy;
    }

    public Route navigate(Point from, Point to) {
        return strategy.plan(from, to);
    }
}"#
            .into(),
            patterns: vec!["Strategy".into()],
            explanation: "Walking, driving, and transit routing are interchangeable \
                          algorithms behind one interface; the navigator swaps them at \
                          runtime without conditionals."
                .into(),
            steps: vec![ExampleStep {
                title: "Extract the varying algorithm".into(),
                description: "Each routing mode becomes its own strategy class.".into(),
                code: "class TransitStrategy implements RouteStrategy { ... }".into(),
            }],
            advantages: vec!["Algorithms swap at runtime without if/else chains".into()],
        },
        PatternExample {
            id: "order-pipeline".into(),
            title: "Order processing pipeline".into(),
            category: Category::Behavioral,
            code: r#"abstract class OrderHandler {
    protected OrderHandler next;

    public final void process(Order order) {
        if (handle(order) && next != null) {
            next.process(order);
        }
    }

    protected abstract boolean handle(Order order);
}

class StockCheck extends OrderHandler { ... }
class FraudCheck extends OrderHandler { ... }
class Billing extends OrderHandler { ... }"#
                .into(),
            patterns: vec![
                "Chain of Responsibility".into(),
                "Template Method".into(),
                "Command".into(),
            ],
            explanation: "Each handler decides whether the order continues down the chain, \
                          the shared process method fixes the traversal skeleton, and \
                          orders travel through the pipeline as self-contained command \
                          objects."
                .into(),
            steps: vec![
                ExampleStep {
                    title: "Link the handlers".into(),
                    description: "Handlers hold a reference to their successor and forward \
                                  when appropriate."
                        .into(),
                    code: "protected OrderHandler next;".into(),
                },
                ExampleStep {
                    title: "Fix the skeleton".into(),
                    description: "The final process method defines the invariant traversal \
                                  while handle stays abstract."
                        .into(),
                    code: "public final void process(Order order) { ... }".into(),
                },
            ],
            advantages: vec![
                "Processing steps are added or reordered without touching callers".into(),
                "Each step has exactly one responsibility".into(),
            ],
        },
    ]
}
