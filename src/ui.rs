use crate::models::{StatsResponse, UserProfile};

pub fn render_index(profile: Option<&UserProfile>, stats: &StatsResponse) -> String {
    let greeting = match profile {
        Some(profile) => format!("Hello, {}! Here is how your sleep is going.", profile.name),
        None => "Welcome! Set up your profile to get started.".to_string(),
    };

    INDEX_HTML
        .replace("{{GREETING}}", &greeting)
        .replace("{{STREAK}}", &stats.streak_days.to_string())
        .replace("{{WEEKLY_AVG}}", &format!("{}h", stats.weekly_average_hours))
        .replace("{{TOTAL}}", &stats.total_records.to_string())
        .replace("{{GOOD_PCT}}", &format!("{}%", stats.good_nights_pct))
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sleep Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #0b0b14;
      --bg-2: #1b1b33;
      --ink: #e8e6f4;
      --muted: #9a96b8;
      --accent: #8b7cf6;
      --accent-2: #3bc9a7;
      --poor: #f87171;
      --fair: #fbbf24;
      --good: #34d399;
      --card: #15152396;
      --line: rgba(139, 124, 246, 0.18);
      --shadow: 0 24px 60px rgba(10, 10, 30, 0.5);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(160deg, var(--bg-1), #121226 55%, #0d0d1a 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      border: 1px solid var(--line);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
      text-align: center;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 4px;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: rgba(255, 255, 255, 0.03);
      border-radius: 18px;
      padding: 18px;
      border: 1px solid var(--line);
      display: grid;
      gap: 8px;
      text-align: center;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent);
    }

    .stat .value.alt {
      color: var(--accent-2);
    }

    .card {
      background: rgba(255, 255, 255, 0.03);
      border: 1px solid var(--line);
      border-radius: 20px;
      padding: 24px;
      display: grid;
      gap: 16px;
    }

    .today-grid {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 16px;
      text-align: center;
    }

    .badge {
      display: inline-block;
      padding: 6px 14px;
      border-radius: 999px;
      font-size: 0.85rem;
      font-weight: 600;
      border: 1px solid transparent;
    }

    .badge.poor { background: rgba(248, 113, 113, 0.12); color: var(--poor); border-color: rgba(248, 113, 113, 0.3); }
    .badge.fair { background: rgba(251, 191, 36, 0.12); color: var(--fair); border-color: rgba(251, 191, 36, 0.3); }
    .badge.good { background: rgba(52, 211, 153, 0.12); color: var(--good); border-color: rgba(52, 211, 153, 0.3); }

    .empty {
      color: var(--muted);
      text-align: center;
      padding: 12px 0;
    }

    form {
      display: grid;
      gap: 16px;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.9rem;
      color: var(--muted);
    }

    input, select {
      appearance: none;
      background: rgba(255, 255, 255, 0.05);
      border: 1px solid var(--line);
      border-radius: 12px;
      padding: 12px 14px;
      color: var(--ink);
      font-size: 1rem;
      font-family: inherit;
    }

    input:focus, select:focus {
      outline: 2px solid var(--accent);
      outline-offset: 1px;
    }

    .times {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 16px;
    }

    .quality-picker {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 10px;
    }

    .quality-option {
      background: rgba(255, 255, 255, 0.04);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 12px;
      color: var(--muted);
      font-size: 0.95rem;
      cursor: pointer;
      display: grid;
      gap: 4px;
      justify-items: center;
    }

    .quality-option .face {
      font-size: 1.5rem;
    }

    .quality-option.selected.poor { border-color: var(--poor); color: var(--poor); }
    .quality-option.selected.fair { border-color: var(--fair); color: var(--fair); }
    .quality-option.selected.good { border-color: var(--good); color: var(--good); }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      font-family: inherit;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-primary {
      background: var(--accent);
      color: #0b0b14;
      box-shadow: 0 10px 24px rgba(139, 124, 246, 0.3);
    }

    .chart-card svg {
      width: 100%;
      height: 220px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-point {
      fill: var(--bg-1);
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(139, 124, 246, 0.14);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .history {
      display: grid;
      gap: 10px;
    }

    .history-row {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
      background: rgba(255, 255, 255, 0.03);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 12px 16px;
      font-size: 0.95rem;
    }

    .history-row .when {
      color: var(--muted);
      min-width: 92px;
    }

    .history-row .hours {
      font-weight: 600;
    }

    .goals {
      display: grid;
      gap: 8px;
    }

    .goal-option {
      background: rgba(255, 255, 255, 0.04);
      border: 1px solid var(--line);
      border-radius: 12px;
      padding: 12px 14px;
      color: var(--ink);
      text-align: left;
      font-size: 0.95rem;
    }

    .goal-option.selected {
      border-color: var(--accent);
      color: var(--accent);
    }

    .tips {
      display: grid;
      gap: 10px;
    }

    .tip {
      display: flex;
      gap: 12px;
      align-items: flex-start;
      background: rgba(255, 255, 255, 0.03);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 14px 16px;
    }

    .tip .emoji {
      font-size: 1.3rem;
    }

    .tip h3 {
      margin: 0 0 4px;
      font-size: 1rem;
    }

    .tip p {
      margin: 0;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .status {
      font-size: 0.95rem;
      color: var(--muted);
      min-height: 1.2em;
      text-align: center;
    }

    .status[data-type="error"] {
      color: var(--poor);
    }

    .status[data-type="ok"] {
      color: var(--good);
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      .times {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>&#127769; Sleep Tracker</h1>
      <p class="subtitle">{{GREETING}}</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Day streak</span>
        <span id="stat-streak" class="value">{{STREAK}}</span>
      </div>
      <div class="stat">
        <span class="label">Weekly average</span>
        <span id="stat-weekly" class="value alt">{{WEEKLY_AVG}}</span>
      </div>
      <div class="stat">
        <span class="label">Nights logged</span>
        <span id="stat-total" class="value">{{TOTAL}}</span>
      </div>
      <div class="stat">
        <span class="label">Good nights</span>
        <span id="stat-good" class="value alt">{{GOOD_PCT}}</span>
      </div>
    </section>

    <section class="card" id="today-card">
      <h2>Last night</h2>
      <div id="today-body" class="empty">Loading...</div>
    </section>

    <section class="card">
      <h2>Log your sleep</h2>
      <form id="record-form">
        <div class="times">
          <label>
            Bed time
            <input type="time" id="bed-time" required />
          </label>
          <label>
            Wake time
            <input type="time" id="wake-time" required />
          </label>
        </div>
        <div class="quality-picker" id="quality-picker">
          <button type="button" class="quality-option poor" data-quality="poor"><span class="face">&#128564;</span>Poor</button>
          <button type="button" class="quality-option fair" data-quality="fair"><span class="face">&#128528;</span>Fair</button>
          <button type="button" class="quality-option good" data-quality="good"><span class="face">&#128522;</span>Good</button>
        </div>
        <button class="btn-primary" type="submit">Save record</button>
      </form>
    </section>

    <section class="card chart-card">
      <h2>Last 7 nights</h2>
      <svg id="chart" viewBox="0 0 600 220" aria-label="Hours slept chart" role="img"></svg>
    </section>

    <section class="card">
      <h2>History</h2>
      <div class="history" id="history"></div>
    </section>

    <section class="card">
      <h2>Profile</h2>
      <form id="profile-form">
        <label>
          Name
          <input type="text" id="profile-name" placeholder="Your name" required />
        </label>
        <label>
          Age
          <input type="number" id="profile-age" min="1" max="120" required />
        </label>
        <label>Sleep goal</label>
        <div class="goals" id="goals"></div>
        <button class="btn-primary" type="submit">Save profile</button>
      </form>
    </section>

    <section class="card">
      <h2>Sleep tips</h2>
      <div class="tips">
        <div class="tip"><span class="emoji">&#128241;</span><div><h3>No screens before bed</h3><p>Put phones, TV and computers away at least an hour before sleeping. Blue light keeps you awake.</p></div></div>
        <div class="tip"><span class="emoji">&#127744;</span><div><h3>Breathe slowly</h3><p>Five minutes of slow, deep breathing calms the body and prepares it for sleep.</p></div></div>
        <div class="tip"><span class="emoji">&#9200;</span><div><h3>Keep regular hours</h3><p>Go to bed and wake up at the same time every day, weekends included.</p></div></div>
        <div class="tip"><span class="emoji">&#127771;</span><div><h3>Quiet, dark, cool</h3><p>Keep the bedroom dark, silent and between 18-22&#176;C.</p></div></div>
        <div class="tip"><span class="emoji">&#128214;</span><div><h3>Read something on paper</h3><p>A physical book helps the mind slow down.</p></div></div>
        <div class="tip"><span class="emoji">&#9749;</span><div><h3>No caffeine after 3pm</h3><p>Coffee, black tea and soda late in the day push your bedtime back.</p></div></div>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const todayBody = document.getElementById('today-body');
    const historyEl = document.getElementById('history');
    const chartEl = document.getElementById('chart');
    const goalsEl = document.getElementById('goals');
    const qualityPicker = document.getElementById('quality-picker');

    const qualityFaces = { poor: '\u{1F634}', fair: '\u{1F610}', good: '\u{1F60A}' };
    const qualityLabels = { poor: 'Poor', fair: 'Fair', good: 'Good' };

    let selectedQuality = null;
    let selectedGoal = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const badge = (quality) =>
      `<span class="badge ${quality}">${qualityFaces[quality]} ${qualityLabels[quality]}</span>`;

    const renderToday = (data) => {
      if (!data.record) {
        todayBody.className = 'empty';
        todayBody.textContent = 'No record for today yet. Log your sleep below.';
        return;
      }
      const record = data.record;
      todayBody.className = '';
      todayBody.innerHTML = `
        <div class="today-grid">
          <div><p class="subtitle">Went to bed</p><strong>${record.bedTime}</strong></div>
          <div><p class="subtitle">Woke up</p><strong>${record.wakeTime}</strong></div>
          <div><p class="subtitle">Slept</p><strong>${record.hoursSlept}h</strong></div>
        </div>
        <div style="text-align:center">${badge(record.quality)}</div>
      `;
    };

    const renderStats = (stats) => {
      document.getElementById('stat-streak').textContent = stats.streakDays;
      document.getElementById('stat-weekly').textContent = `${stats.weeklyAverageHours}h`;
      document.getElementById('stat-total').textContent = stats.totalRecords;
      document.getElementById('stat-good').textContent = `${stats.goodNightsPct}%`;
    };

    const renderHistory = (records) => {
      if (!records.length) {
        historyEl.innerHTML = '<div class="empty">Nothing logged yet.</div>';
        return;
      }
      historyEl.innerHTML = records
        .map((record) => `
          <div class="history-row">
            <span class="when">${record.date}</span>
            <span>${record.bedTime} &rarr; ${record.wakeTime}</span>
            <span class="hours">${record.hoursSlept}h</span>
            ${badge(record.quality)}
          </div>
        `)
        .join('');
    };

    const renderChart = (records) => {
      const byDate = new Map(records.map((record) => [record.date, record.hoursSlept]));
      const points = [];
      const now = new Date();
      for (let offset = 6; offset >= 0; offset -= 1) {
        const day = new Date(now);
        day.setDate(now.getDate() - offset);
        const key = `${day.getFullYear()}-${String(day.getMonth() + 1).padStart(2, '0')}-${String(day.getDate()).padStart(2, '0')}`;
        points.push({ label: key.slice(5), value: byDate.get(key) ?? 0 });
      }

      const width = 600;
      const height = 220;
      const paddingX = 44;
      const paddingY = 34;
      const top = 20;
      const max = Math.max(10, ...points.map((point) => point.value));

      const xStep = (width - paddingX * 2) / (points.length - 1);
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - (value / max) * (height - top - paddingY);

      const path = points
        .map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(point.value).toFixed(2)}`)
        .join(' ');

      let grid = '';
      for (let i = 0; i <= 4; i += 1) {
        const value = (max * i) / 4;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${value.toFixed(0)}h</text>`;
      }

      const labels = points
        .map((point, index) => `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${point.label}</text>`)
        .join('');

      const circles = points
        .map((point, index) => `<circle class="chart-point" cx="${x(index)}" cy="${y(point.value)}" r="4" />`)
        .join('');

      chartEl.innerHTML = `${grid}<path class="chart-line" d="${path}" />${circles}${labels}`;
    };

    const renderGoals = (goals, current) => {
      selectedGoal = current || null;
      goalsEl.innerHTML = '';
      goals.forEach((goal) => {
        const option = document.createElement('button');
        option.type = 'button';
        option.className = 'goal-option' + (goal === selectedGoal ? ' selected' : '');
        option.textContent = goal;
        option.addEventListener('click', () => {
          selectedGoal = goal;
          Array.from(goalsEl.children).forEach((child) =>
            child.classList.toggle('selected', child.textContent === goal)
          );
        });
        goalsEl.appendChild(option);
      });
    };

    const loadToday = async () => {
      const res = await fetch('/api/today');
      if (!res.ok) throw new Error('Unable to load today record');
      renderToday(await res.json());
    };

    const loadStats = async () => {
      const res = await fetch('/api/stats');
      if (!res.ok) throw new Error('Unable to load stats');
      renderStats(await res.json());
    };

    const loadRecords = async () => {
      const res = await fetch('/api/records');
      if (!res.ok) throw new Error('Unable to load records');
      const records = await res.json();
      renderHistory(records);
      renderChart(records);
    };

    const loadProfile = async () => {
      const [profileRes, goalsRes] = await Promise.all([
        fetch('/api/profile'),
        fetch('/api/goals'),
      ]);
      if (!profileRes.ok || !goalsRes.ok) throw new Error('Unable to load profile');
      const profile = await profileRes.json();
      const goals = await goalsRes.json();
      if (profile) {
        document.getElementById('profile-name').value = profile.name;
        document.getElementById('profile-age').value = profile.age;
      }
      renderGoals(goals, profile ? profile.goal : null);
    };

    const refresh = async () => {
      await Promise.all([loadToday(), loadStats(), loadRecords()]);
    };

    qualityPicker.addEventListener('click', (event) => {
      const option = event.target.closest('.quality-option');
      if (!option) return;
      selectedQuality = option.dataset.quality;
      Array.from(qualityPicker.children).forEach((child) =>
        child.classList.toggle('selected', child === option)
      );
    });

    document.getElementById('record-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const bedTime = document.getElementById('bed-time').value;
      const wakeTime = document.getElementById('wake-time').value;
      if (!bedTime || !wakeTime || !selectedQuality) {
        setStatus('Fill in both times and pick a quality.', 'error');
        return;
      }
      setStatus('Saving...', '');
      fetch('/api/records', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ bedTime, wakeTime, quality: selectedQuality }),
      })
        .then(async (res) => {
          if (!res.ok) throw new Error(await res.text() || 'Request failed');
          await refresh();
          setStatus('Sleep record saved.', 'ok');
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('profile-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const name = document.getElementById('profile-name').value.trim();
      const age = Number(document.getElementById('profile-age').value);
      if (!name || !age || !selectedGoal) {
        setStatus('Fill in your name, age and a goal.', 'error');
        return;
      }
      setStatus('Saving...', '');
      fetch('/api/profile', {
        method: 'PUT',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ name, age, goal: selectedGoal }),
      })
        .then(async (res) => {
          if (!res.ok) throw new Error(await res.text() || 'Request failed');
          setStatus('Profile saved.', 'ok');
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
    loadProfile().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
