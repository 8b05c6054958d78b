// Prompt templates for the advice module.
// Placeholders are replaced by advice::grounding before sending.

pub const NEW_USER_NOTE: &str = "Note: This user is new and hasn't completed their financial profile yet. \
    Provide general financial advice and encourage them to complete their profile setup.";

pub const PROFILE_TEMPLATE: &str = "User's Financial Profile:
- Credit Score: {credit_score}
- Monthly Income: {monthly_income}
- Monthly Expenses: {monthly_expenses}
- Savings: {savings_balance}
- Total Debt: {debt_amount}";

pub const EXPLAIN_TEMPLATE: &str = "Explain the following advice in simple, beginner-friendly terms. \
    Keep it concise but clear. Advice: \n{message}";

pub const PURCHASE_TEMPLATE: &str = "I want to buy {item_name} for {item_price}. Can I afford this? \
    Should I buy it now or wait?";

pub const PURCHASE_WITH_PROFILE_SUFFIX: &str =
    " Consider my credit score, monthly budget, and financial goals.";

pub const PURCHASE_NO_PROFILE_SUFFIX: &str = " (Note: I haven't completed my financial profile yet, \
    so provide general advice and encourage me to complete my profile for personalized recommendations.)";

pub const BUDGET_WITH_INCOME_TEMPLATE: &str = "Help me create a monthly budget plan based on my income of \
    {monthly_income}. Suggest allocations for different categories.";

pub const BUDGET_NO_INCOME: &str = "Help me create a monthly budget plan. I haven't set up my financial \
    profile yet, so provide general budgeting advice and encourage me to complete my profile for \
    personalized recommendations.";

pub const CREDIT_WITH_SCORE_TEMPLATE: &str = "My credit score is {credit_score}. Explain what this means \
    and give me a specific plan to improve it.";

pub const CREDIT_NO_SCORE: &str = "I want to improve my credit score. Explain what credit scores mean and \
    give me general tips for improvement. Encourage me to complete my financial profile for personalized advice.";

pub const SUBSCRIPTIONS_WITH_DATA: &str =
    "Review my subscriptions and recommend which ones I should cancel or downgrade to save money.";

pub const SUBSCRIPTIONS_NO_DATA: &str = "I want to optimize my subscriptions. Since I haven't added any yet, \
    provide general advice on subscription management and encourage me to add my subscriptions to get \
    personalized recommendations.";

pub const UTILITY_PROMPT: &str = "Analyze my recent electricity and gas bills and provide practical, \
    personalized energy-saving actions I can take to lower my monthly utility costs. Keep suggestions \
    realistic for an average apartment.";

pub const NEXT_STEPS_TEMPLATE: &str = "Based on my current finances, what are the next three steps I \
    should take? {message}";
